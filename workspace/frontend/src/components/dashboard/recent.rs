use common::TransactionRecord;
use rust_decimal::Decimal;
use yew::prelude::*;

const RECENT_COUNT: usize = 10;

#[derive(Properties, PartialEq)]
pub struct Props {
    /// Displayed history, oldest first
    pub records: Vec<TransactionRecord>,
}

#[function_component(RecentTransactions)]
pub fn recent_transactions(props: &Props) -> Html {
    if props.records.is_empty() {
        return html! {
            <div class="text-center py-8 text-gray-500">
                <p>{"No transactions in the selected range."}</p>
            </div>
        };
    }

    html! {
        <table class="table table-zebra">
            <thead>
                <tr>
                    <th>{"Date"}</th>
                    <th>{"Description"}</th>
                    <th class="text-right">{"Amount"}</th>
                    <th class="text-right">{"Balance"}</th>
                </tr>
            </thead>
            <tbody>
                { for props.records.iter().rev().take(RECENT_COUNT).map(|record| {
                    let amount = record.net_amount();
                    let class = if amount >= Decimal::ZERO { "text-success" } else { "text-error" };
                    html! {
                        <tr>
                            <td>{record.transaction_date.format("%Y-%m-%d").to_string()}</td>
                            <td>{record.description.clone()}</td>
                            <td class={classes!("text-right", class)}>{format!("{:+.2}", amount)}</td>
                            <td class="text-right">{format!("{:.2}", record.balance)}</td>
                        </tr>
                    }
                }) }
            </tbody>
        </table>
    }
}
