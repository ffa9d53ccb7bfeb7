use common::series::{history_series, prediction_series};
use common::{ChartPoint, ForecastPoint, TransactionRecord};
use plotly::common::{DashType, Line, Mode, Title};
use plotly::layout::Axis;
use plotly::{Layout, Scatter};
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;
use yew::prelude::*;

const CHART_ID: &str = "balance-chart";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly)]
    fn newPlot(div_id: &str, data: JsValue, layout: JsValue);
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub history: Vec<TransactionRecord>,
    pub predictions: Vec<ForecastPoint>,
}

/// Splits chart points into Plotly's x and y columns.
fn columns(points: &[ChartPoint]) -> (Vec<String>, Vec<f64>) {
    points
        .iter()
        .map(|point| {
            (
                point.x.format("%Y-%m-%d %H:%M:%S").to_string(),
                point.y.to_f64().unwrap_or_default(),
            )
        })
        .unzip()
}

fn to_js<T: Serialize>(value: &T) -> Option<JsValue> {
    let json = serde_json::to_string(value).ok()?;
    js_sys::JSON::parse(&json).ok()
}

/// Historical balance line plus the dashed predicted line, which starts at the
/// last plotted historical point.
#[function_component(BalanceChart)]
pub fn balance_chart(props: &Props) -> Html {
    let container_ref = use_node_ref();

    use_effect_with(
        (container_ref.clone(), props.history.clone(), props.predictions.clone()),
        move |(container_ref, history, predictions)| {
            if let Some(element) = container_ref.cast::<HtmlElement>() {
                element.set_id(CHART_ID);

                let (history_x, history_y) = columns(&history_series(history));
                let (predicted_x, predicted_y) = columns(&prediction_series(history, predictions));
                log::debug!(
                    "Plotting {} historical and {} predicted points",
                    history_x.len(),
                    predicted_x.len()
                );

                let historical = Scatter::new(history_x, history_y)
                    .mode(Mode::Lines)
                    .name("Historical")
                    .line(Line::new().color("rgb(59, 130, 246)").width(2.0));
                let predicted = Scatter::new(predicted_x, predicted_y)
                    .mode(Mode::LinesMarkers)
                    .name("Predicted")
                    .line(Line::new().color("rgb(251, 146, 60)").width(2.0).dash(DashType::Dash));

                let layout = Layout::new()
                    .title(Title::from("Account Balance"))
                    .x_axis(Axis::new().title(Title::from("Date")))
                    .y_axis(Axis::new().title(Title::from("Balance")))
                    .height(450);

                let data = js_sys::Array::new();
                match (to_js(&historical), to_js(&predicted), to_js(&layout)) {
                    (Some(historical), Some(predicted), Some(layout)) => {
                        data.push(&historical);
                        data.push(&predicted);
                        newPlot(CHART_ID, data.into(), layout);
                    }
                    _ => log::error!("Failed to serialize chart data"),
                }
            }
            || ()
        },
    );

    html! {
        <div ref={container_ref} style="width:100%; height:450px;"></div>
    }
}
