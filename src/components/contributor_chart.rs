use yew::prelude::*;

use crate::grouping::Contributor;

#[derive(Properties, PartialEq)]
pub struct ContributorChartProps {
    pub contributors: Vec<Contributor>,
}

/// Bar width as a percentage of the busiest user.
fn bar_percent(count: usize, max: usize) -> usize {
    if max == 0 {
        0
    } else {
        (count * 100 / max).max(2)
    }
}

#[function_component(ContributorChart)]
pub fn contributor_chart(props: &ContributorChartProps) -> Html {
    let max = props.contributors.iter().map(|c| c.count).max().unwrap_or(0);

    if props.contributors.is_empty() {
        return html! {
            <div style="color:#6ee7b7; font-size:0.9em; text-align:center; padding:2em 0;">{ "No activity yet." }</div>
        };
    }

    html! {
        <div style="display:flex; flex-direction:column; gap:0.75em;">
            { for props.contributors.iter().map(|contributor| html! {
                <div key={contributor.email.clone()} title={format!("{}: {} logs", contributor.email, contributor.count)}
                    style="display:flex; align-items:center; gap:0.75em;">
                    <span style="width:80px; font-size:12px; color:#065f46; overflow:hidden; text-overflow:ellipsis; white-space:nowrap;">
                        { &contributor.name }
                    </span>
                    <div style="flex:1; background:#f0fdf4; border-radius:4px; height:20px;">
                        <div style={format!("width:{}%; height:100%; background:#059669; border-radius:0 4px 4px 0;", bar_percent(contributor.count, max))}></div>
                    </div>
                    <span style="width:2.5em; text-align:right; font-size:12px; color:#047857;">{ contributor.count }</span>
                </div>
            }) }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_percent() {
        assert_eq!(bar_percent(10, 10), 100);
        assert_eq!(bar_percent(5, 10), 50);
        assert_eq!(bar_percent(1, 1000), 2);
        assert_eq!(bar_percent(0, 0), 0);
    }
}
