//! Results panel: metric counters, insight cards and charts.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Cell, Chart, Dataset, GraphType, List,
        ListItem, Row, Table,
    },
    Frame,
};
use sk_protocol::scenario_models::{ChartKind, ChartSpec};

use crate::view::ScenarioView;

const SERIES_COLORS: [Color; 5] = [
    Color::Cyan,
    Color::Magenta,
    Color::Yellow,
    Color::Green,
    Color::Blue,
];

/// Renders the results panel. Nothing is drawn until results are revealed.
pub fn render_results(frame: &mut Frame, area: Rect, view: &ScenarioView) {
    if !view.results_visible {
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(view.metrics.len() as u16 + 3),
            Constraint::Min(3),
        ])
        .split(columns[0]);

    render_metrics(frame, left[0], view);
    render_insights(frame, left[1], view);
    render_charts(frame, columns[1], &view.charts);
}

fn render_metrics(frame: &mut Frame, area: Rect, view: &ScenarioView) {
    let rows: Vec<Row> = view
        .metrics
        .iter()
        .map(|metric| {
            let value_style = if metric.counting {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            };
            Row::new(vec![
                Cell::from(metric.label.clone()),
                Cell::from(metric.display.clone()).style(value_style),
            ])
        })
        .collect();

    let header = Row::new(vec![Cell::from("Metric"), Cell::from("Value")]).style(
        Style::default()
            .add_modifier(Modifier::BOLD)
            .fg(Color::Cyan),
    );

    let table = Table::new(rows, [Constraint::Percentage(60), Constraint::Percentage(40)])
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Key Metrics"));

    frame.render_widget(table, area);
}

fn render_insights(frame: &mut Frame, area: Rect, view: &ScenarioView) {
    let items: Vec<ListItem> = view
        .insights
        .iter()
        .filter(|insight| insight.visible)
        .map(|insight| ListItem::new(format!("• {}", insight.text)))
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Insights"));
    frame.render_widget(list, area);
}

fn render_charts(frame: &mut Frame, area: Rect, charts: &[ChartSpec]) {
    if charts.is_empty() {
        frame.render_widget(Block::default().borders(Borders::ALL).title("Charts"), area);
        return;
    }

    let constraints = vec![Constraint::Ratio(1, charts.len() as u32); charts.len()];
    let areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (chart, chart_area) in charts.iter().zip(areas.iter()) {
        match chart.kind {
            ChartKind::Line => render_line_chart(frame, *chart_area, chart),
            ChartKind::Bar | ChartKind::StackedBar | ChartKind::Doughnut => {
                render_bar_chart(frame, *chart_area, chart)
            }
        }
    }
}

fn render_line_chart(frame: &mut Frame, area: Rect, chart: &ChartSpec) {
    let points: Vec<Vec<(f64, f64)>> = chart
        .datasets
        .iter()
        .map(|dataset| {
            dataset
                .data
                .iter()
                .enumerate()
                .map(|(x, y)| (x as f64, *y))
                .collect()
        })
        .collect();

    let datasets: Vec<Dataset> = chart
        .datasets
        .iter()
        .zip(points.iter())
        .enumerate()
        .map(|(i, (dataset, data))| {
            Dataset::default()
                .name(dataset.label.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(SERIES_COLORS[i % SERIES_COLORS.len()]))
                .data(data)
        })
        .collect();

    let (y_min, y_max) = value_bounds(chart);
    let x_max = chart.labels.len().saturating_sub(1).max(1) as f64;
    let x_labels: Vec<Span> = [chart.labels.first(), chart.labels.last()]
        .into_iter()
        .flatten()
        .map(|label| Span::raw(label.clone()))
        .collect();

    let widget = Chart::new(datasets)
        .block(Block::default().borders(Borders::ALL).title(chart.title.clone()))
        .x_axis(Axis::default().bounds([0.0, x_max]).labels(x_labels))
        .y_axis(
            Axis::default()
                .title(chart.y_axis_title.clone().unwrap_or_default())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::raw(format!("{y_min:.0}")),
                    Span::raw(format!("{y_max:.0}")),
                ]),
        );

    frame.render_widget(widget, area);
}

/// Bar, stacked bar and doughnut charts all render as grouped bars: one
/// group per label, one bar per dataset.
fn render_bar_chart(frame: &mut Frame, area: Rect, chart: &ChartSpec) {
    let groups: Vec<BarGroup> = chart
        .labels
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let bars: Vec<Bar> = chart
                .datasets
                .iter()
                .enumerate()
                .filter_map(|(series, dataset)| {
                    dataset.data.get(index).map(|value| {
                        Bar::default()
                            .value(value.max(0.0).round() as u64)
                            .text_value(format!("{value}"))
                            .style(Style::default().fg(SERIES_COLORS[series % SERIES_COLORS.len()]))
                    })
                })
                .collect();
            BarGroup::default()
                .label(Line::from(label.clone()))
                .bars(&bars)
        })
        .collect();

    let mut widget = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title(chart.title.clone()))
        .bar_width(5)
        .bar_gap(1)
        .group_gap(2);
    for group in groups {
        widget = widget.data(group);
    }

    frame.render_widget(widget, area);
}

fn value_bounds(chart: &ChartSpec) -> (f64, f64) {
    let values = chart.datasets.iter().flat_map(|d| d.data.iter().copied());
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let low = min.min(0.0);
    if max > low {
        (low, max)
    } else {
        (low, low + 1.0)
    }
}
