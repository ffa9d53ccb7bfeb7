use common::series::{filter_history, sort_history};
use common::{ForecastPoint, ForecastTrigger, HistoryRange, TransactionRecord, DEFAULT_PREDICTION_MONTHS};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::chart::BalanceChart;
use super::controls::Controls;
use super::recent::RecentTransactions;
use crate::api_client::{get_transactions, post_prediction};
use crate::hooks::{alert, FetchState};

#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    let transactions = use_state(|| FetchState::<Vec<TransactionRecord>>::Loading);
    let history_range = use_state(HistoryRange::default);
    let prediction_months = use_state(|| DEFAULT_PREDICTION_MONTHS);
    let predictions = use_state(Vec::<ForecastPoint>::new);
    let trigger = use_state(ForecastTrigger::default);
    let predicting = use_state(|| false);
    // Only the latest forecast request may update the chart
    let latest_request = use_mut_ref(|| 0u64);

    // History is fetched once on mount
    {
        let transactions = transactions.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match get_transactions().await {
                    Ok(envelope) => {
                        let mut items = envelope.data.transaction_items;
                        sort_history(&mut items);
                        log::debug!("Loaded {} transactions", items.len());
                        transactions.set(FetchState::Success(items));
                    }
                    Err(err) => {
                        alert(&err);
                        transactions.set(FetchState::Error(err));
                    }
                }
            });
            || ()
        });
    }

    let request_forecast = {
        let predictions = predictions.clone();
        let predicting = predicting.clone();
        let latest_request = latest_request.clone();
        Callback::from(move |months: u32| {
            let request_id = {
                let mut latest = latest_request.borrow_mut();
                *latest += 1;
                *latest
            };
            predicting.set(true);

            let predictions = predictions.clone();
            let predicting = predicting.clone();
            let latest_request = latest_request.clone();
            spawn_local(async move {
                let result = post_prediction(months).await;
                if *latest_request.borrow() != request_id {
                    log::debug!("Discarding superseded forecast for {} months", months);
                    return;
                }
                predicting.set(false);
                match result {
                    Ok(points) => predictions.set(points),
                    Err(err) => alert(&err),
                }
            });
        })
    };

    let on_predict = {
        let trigger = trigger.clone();
        let prediction_months = prediction_months.clone();
        let request_forecast = request_forecast.clone();
        Callback::from(move |_: ()| {
            trigger.set(trigger.pressed());
            request_forecast.emit(*prediction_months);
        })
    };

    let on_history_change = {
        let history_range = history_range.clone();
        Callback::from(move |range: HistoryRange| {
            log::debug!("History range changed to {}", range);
            history_range.set(range);
        })
    };

    let on_prediction_change = {
        let prediction_months = prediction_months.clone();
        let trigger = *trigger;
        Callback::from(move |months: u32| {
            log::debug!("Prediction range changed to {} months", months);
            prediction_months.set(months);
            if let Some(months) = trigger.on_horizon_change(months) {
                request_forecast.emit(months);
            }
        })
    };

    match &*transactions {
        FetchState::Loading => html! {
            <div class="flex justify-center items-center py-8">
                <span class="loading loading-spinner loading-lg"></span>
            </div>
        },
        FetchState::Error(error) => html! {
            <div class="alert alert-error">
                <span>{error.clone()}</span>
            </div>
        },
        FetchState::Success(records) => {
            let filtered = filter_history(records, *history_range);
            html! {
                <>
                    <Controls
                        history_range={*history_range}
                        prediction_months={*prediction_months}
                        predicting={*predicting}
                        on_history_change={on_history_change}
                        on_prediction_change={on_prediction_change}
                        on_predict={on_predict}
                    />
                    <div class="card bg-base-100 shadow mt-6">
                        <div class="card-body">
                            <BalanceChart history={filtered.clone()} predictions={(*predictions).clone()} />
                        </div>
                    </div>
                    <div class="card bg-base-100 shadow mt-6">
                        <div class="card-body">
                            <h2 class="card-title">{"Recent Transactions"}</h2>
                            <RecentTransactions records={filtered} />
                        </div>
                    </div>
                </>
            }
        }
    }
}
