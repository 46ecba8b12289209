use super::super::Model;
use yew::prelude::*;

pub fn render_results(model: &Model) -> Html {
    let predictions = model.selector.predictions();
    let Some(top) = predictions.top() else {
        return html! {};
    };

    html! {
        <div class="predictions-section">
            <div class="result-header">
                <h2>{"Predictions"}</h2>
                <div class="confidence-meter">
                    <div class="meter-label">{ top.label.clone() }</div>
                    <div class="meter">
                        <div class="meter-fill" style={format!("width: {}", top.percentage_label())}></div>
                    </div>
                    <div class="meter-value">{ top.percentage_label() }</div>
                </div>
            </div>
            <div class="predictions-list">
                { for predictions.iter().enumerate().map(|(i, prediction)| {
                    let percentage = prediction.percentage_label();
                    html! {
                        <div class={classes!("prediction-item", (i == 0).then_some("top"))} key={i.to_string()}>
                            <span class="label">{ prediction.label.clone() }</span>
                            <div class="confidence-bar">
                                <div class="confidence-fill" style={format!("width: {}", percentage)}></div>
                            </div>
                            <span class="percentage">{ percentage }</span>
                        </div>
                    }
                })}
            </div>
        </div>
    }
}
