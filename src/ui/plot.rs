use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints};

use crate::color::{translucent, viridis_palette, ACTUAL_COLOR, ESTIMATED_COLOR};
use crate::view::{DashboardView, DaySeries, TOP_CATEGORIES};

const CHART_HEIGHT: f32 = 340.0;

// ---------------------------------------------------------------------------
// Top purchased categories (horizontal bars)
// ---------------------------------------------------------------------------

/// Bar chart of the most frequent categories, largest at the top.
pub fn top_categories_chart(ui: &mut Ui, view: &DashboardView) {
    ui.heading("Top Purchased Product Categories");

    let n = view.top_categories.len();
    let palette = viridis_palette(n);
    let bars: Vec<Bar> = view
        .top_categories
        .iter()
        .zip(palette)
        .enumerate()
        .map(|(i, ((category, count), color))| {
            Bar::new((n - 1 - i) as f64, *count as f64)
                .name(category)
                .fill(color)
                .width(0.8)
        })
        .collect();

    let labels: Vec<String> = view
        .top_categories
        .iter()
        .rev()
        .map(|(category, _)| category.clone())
        .collect();

    ui.small(top_categories_title());
    Plot::new("top_categories")
        .height(CHART_HEIGHT)
        .x_axis_label("Number of Purchases")
        .y_axis_label("Category")
        .y_axis_formatter(move |mark: GridMark, _range| category_tick(&labels, mark.value))
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
        });
}

fn top_categories_title() -> String {
    format!("Top {TOP_CATEGORIES} Purchased Product Categories")
}

/// Axis label for a bar position; blank between bars.
fn category_tick(labels: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Actual vs estimated delivery time (overlaid histograms + KDE)
// ---------------------------------------------------------------------------

/// Overlaid one-day histograms of both delivery series with density curves.
pub fn delivery_time_chart(ui: &mut Ui, view: &DashboardView) {
    ui.heading("Actual vs Estimated Delivery Time");

    let series = [
        ("Actual Delivery Time", &view.actual_delivery, ACTUAL_COLOR),
        ("Estimated Delivery Time", &view.estimated_delivery, ESTIMATED_COLOR),
    ];

    Plot::new("delivery_times")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Days")
        .y_axis_label("Frequency")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (name, days, color) in series {
                plot_ui.bar_chart(histogram_chart(name, days, color));
                if !days.kde.is_empty() {
                    let points = PlotPoints::from(days.kde.clone());
                    plot_ui.line(Line::new(points).name(name).color(color).width(2.0));
                }
            }
        });
}

fn histogram_chart(name: &str, days: &DaySeries, color: Color32) -> BarChart {
    let fill = translucent(color, 110);
    let bars = days
        .bins
        .iter()
        .map(|(&day, &count)| Bar::new(day as f64, count as f64).width(1.0).fill(fill))
        .collect();
    BarChart::new(bars).name(name).color(color)
}
