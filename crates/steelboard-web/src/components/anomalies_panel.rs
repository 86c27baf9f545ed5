//! Anomalies panel component

use leptos::prelude::*;
use steelboard_core::AnomalyRow;
use steelboard_types::AnomalySeverity;

use super::stats_card::{CardColor, StatsCard};

/// Ranked anomaly list with critical/warning counts on top.
///
/// Expects rows already filtered and ordered by `rank_anomalies`.
#[component]
pub fn AnomaliesPanel(
    rows: Vec<AnomalyRow>,
    /// Maximum rows shown; the rest are summarized as "+N more"
    #[prop(default = 10)]
    limit: usize,
) -> impl IntoView {
    let critical = rows
        .iter()
        .filter(|r| r.severity == AnomalySeverity::Critical)
        .count();
    let warning = rows.len() - critical;

    if rows.is_empty() {
        return view! {
            <div class="card anomalies-panel">
                <h3 class="card-title">"Anomalies"</h3>
                <div class="anomalies-empty">"No anomalies detected"</div>
            </div>
        }
        .into_any();
    }

    let hidden = rows.len().saturating_sub(limit);
    let items = rows
        .into_iter()
        .take(limit)
        .map(|row| {
            let class = format!("anomaly-row anomaly-{}", row.severity.class_name());
            view! {
                <li class=class>
                    <span class="anomaly-icon">{row.severity.icon()}</span>
                    <span class="anomaly-date">{row.date.format("%Y-%m-%d").to_string()}</span>
                    <span class="anomaly-metric">{row.metric.clone()}</span>
                    <span class="anomaly-value">{row.format_value()}</span>
                    <span class="anomaly-expected">{format!("expected {}", row.format_expected())}</span>
                    <span class="anomaly-deviation">{row.format_deviation()}</span>
                    <span class="anomaly-zscore">{format!("z = {:.1}", row.z_score)}</span>
                </li>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <div class="card anomalies-panel">
            <h3 class="card-title">"Anomalies"</h3>
            <div class="anomalies-summary">
                <StatsCard
                    label="Critical".to_string()
                    value=critical.to_string()
                    icon=AnomalySeverity::Critical.icon()
                    color=CardColor::for_severity(AnomalySeverity::Critical)
                />
                <StatsCard
                    label="Warning".to_string()
                    value=warning.to_string()
                    icon=AnomalySeverity::Warning.icon()
                    color=CardColor::for_severity(AnomalySeverity::Warning)
                />
            </div>
            <ul class="anomalies-list">{items}</ul>
            {(hidden > 0).then(|| view! {
                <div class="anomalies-more">{format!("+{} more", hidden)}</div>
            })}
        </div>
    }
    .into_any()
}
