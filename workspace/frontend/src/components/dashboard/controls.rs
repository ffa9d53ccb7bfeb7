use common::series::PREDICTION_RANGE_OPTIONS;
use common::HistoryRange;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub history_range: HistoryRange,
    pub prediction_months: u32,
    pub predicting: bool,
    pub on_history_change: Callback<HistoryRange>,
    pub on_prediction_change: Callback<u32>,
    pub on_predict: Callback<()>,
}

/// Range selectors and the predict button.
#[function_component(Controls)]
pub fn controls(props: &Props) -> Html {
    let on_history = {
        let on_history_change = props.on_history_change.clone();
        Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlSelectElement>().value();
            match value.parse::<HistoryRange>() {
                Ok(range) => on_history_change.emit(range),
                Err(err) => log::warn!("Ignoring history selection: {}", err),
            }
        })
    };

    let on_prediction = {
        let on_prediction_change = props.on_prediction_change.clone();
        Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlSelectElement>().value();
            match value.parse::<u32>() {
                Ok(months) => on_prediction_change.emit(months),
                Err(err) => log::warn!("Ignoring prediction selection `{}`: {}", value, err),
            }
        })
    };

    let on_click = {
        let on_predict = props.on_predict.clone();
        Callback::from(move |_: MouseEvent| on_predict.emit(()))
    };

    html! {
        <div class="flex flex-wrap gap-4 items-end">
            <label class="form-control">
                <span class="label-text">{"History"}</span>
                <select class="select select-bordered" onchange={on_history}>
                    { for HistoryRange::OPTIONS.iter().map(|option| html! {
                        <option value={option.to_string()} selected={*option == props.history_range}>
                            {option.label()}
                        </option>
                    }) }
                </select>
            </label>
            <label class="form-control">
                <span class="label-text">{"Prediction"}</span>
                <select class="select select-bordered" onchange={on_prediction}>
                    { for PREDICTION_RANGE_OPTIONS.iter().map(|months| html! {
                        <option value={months.to_string()} selected={*months == props.prediction_months}>
                            {format!("Next {} Months", months)}
                        </option>
                    }) }
                </select>
            </label>
            <button class="btn btn-primary" onclick={on_click} disabled={props.predicting}>
                if props.predicting {
                    <span class="loading loading-spinner loading-sm"></span>
                }
                {"Predict Future Balance"}
            </button>
        </div>
    }
}
