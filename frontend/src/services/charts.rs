use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::coordinator::ports::{ChartError, ChartHandle, ChartPainter};
use crate::coordinator::state::ChartSlot;
use crate::coordinator::view_models::ChartSpec;

type Area = DrawingArea<CanvasBackend, Shift>;

// App's primary blue, same as the progress bars
const PRIMARY: RGBColor = RGBColor(102, 126, 234);
const BUDGET_COLOR: RGBColor = RGBColor(16, 185, 129);
const ACTUAL_COLOR: RGBColor = RGBColor(239, 68, 68);
const AXIS_COLOR: RGBColor = RGBColor(230, 230, 230);
const EMPTY_TEXT_COLOR: RGBColor = RGBColor(150, 150, 150);

const PALETTE: [RGBColor; 10] = [
    RGBColor(102, 126, 234),
    RGBColor(240, 147, 251),
    RGBColor(16, 185, 129),
    RGBColor(245, 158, 11),
    RGBColor(239, 68, 68),
    RGBColor(59, 130, 246),
    RGBColor(139, 92, 246),
    RGBColor(236, 72, 153),
    RGBColor(20, 184, 166),
    RGBColor(107, 114, 128),
];

/// Draws chart specs onto the canvases rendered by the visualizations panel
#[derive(Default)]
pub struct CanvasChartPainter;

/// Clears its canvas when disposed
struct CanvasChart {
    canvas: HtmlCanvasElement,
}

impl ChartHandle for CanvasChart {
    fn dispose(&mut self) {
        let context = self
            .canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok());

        if let Some(context) = context {
            context.clear_rect(
                0.0,
                0.0,
                self.canvas.width() as f64,
                self.canvas.height() as f64,
            );
        }
    }
}

impl ChartPainter for CanvasChartPainter {
    fn draw(&self, slot: ChartSlot, spec: &ChartSpec) -> Result<Box<dyn ChartHandle>, ChartError> {
        let canvas = find_canvas(slot.canvas_id())?;

        let backend = CanvasBackend::with_canvas_object(canvas.clone())
            .ok_or_else(|| ChartError::Draw("canvas has no 2d context".to_string()))?;
        let root = backend.into_drawing_area();
        root.fill(&WHITE).map_err(draw_error)?;

        if spec.is_empty() {
            draw_empty(&root)?;
        } else {
            match spec {
                ChartSpec::Line {
                    labels,
                    values,
                    series,
                } => draw_line(&root, labels, values, series)?,
                ChartSpec::Pie { labels, values } => draw_pie(&root, labels, values)?,
                ChartSpec::GroupedBars {
                    labels,
                    budget,
                    actual,
                } => draw_grouped_bars(&root, labels, budget, actual)?,
            }
        }

        root.present().map_err(draw_error)?;
        log::debug!(target: "charts", "drew {:?}", slot);
        Ok(Box::new(CanvasChart { canvas }))
    }
}

fn find_canvas(id: &str) -> Result<HtmlCanvasElement, ChartError> {
    gloo::utils::document()
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<HtmlCanvasElement>().ok())
        .ok_or_else(|| ChartError::CanvasMissing(id.to_string()))
}

fn draw_error(e: impl std::fmt::Display) -> ChartError {
    ChartError::Draw(e.to_string())
}

fn draw_empty(root: &Area) -> Result<(), ChartError> {
    let (width, height) = root.dim_in_pixel();
    let style = ("sans-serif", 16).into_font().color(&EMPTY_TEXT_COLOR);
    root.draw(&Text::new(
        "No data available",
        (width as i32 / 2 - 60, height as i32 / 2),
        style,
    ))
    .map_err(draw_error)
}

fn draw_line(root: &Area, labels: &[String], values: &[f64], series: &str) -> Result<(), ChartError> {
    let count = values.len() as i32;
    let mut chart = ChartBuilder::on(root)
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d((0..count).into_segmented(), 0.0..value_ceiling(values))
        .map_err(draw_error)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc("Spending ($)")
        .y_label_formatter(&|v| format!("${:.0}", v))
        .x_label_formatter(&|v| segment_label(labels, v))
        .label_style(("sans-serif", 12, &PRIMARY))
        .axis_style(&AXIS_COLOR)
        .bold_line_style(&RGBColor(245, 245, 245))
        .light_line_style(&RGBColor(250, 250, 250))
        .draw()
        .map_err(draw_error)?;

    chart
        .draw_series(LineSeries::new(
            values
                .iter()
                .enumerate()
                .map(|(i, v)| (SegmentValue::CenterOf(i as i32), *v)),
            PRIMARY.stroke_width(3),
        ))
        .map_err(draw_error)?
        .label(series)
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], PRIMARY.stroke_width(3)));

    chart
        .draw_series(
            values
                .iter()
                .enumerate()
                .map(|(i, v)| Circle::new((SegmentValue::CenterOf(i as i32), *v), 4, PRIMARY.filled())),
        )
        .map_err(draw_error)?;

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&AXIS_COLOR)
        .draw()
        .map_err(draw_error)
}

fn draw_pie(root: &Area, labels: &[String], values: &[f64]) -> Result<(), ChartError> {
    if values.iter().sum::<f64>() <= 0.0 {
        return draw_empty(root);
    }

    let (width, height) = root.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);
    let radius = f64::from(width.min(height)) * 0.35;
    let colors: Vec<RGBColor> = (0..values.len()).map(palette_color).collect();

    let mut pie = Pie::new(&center, &radius, values, &colors, labels);
    pie.label_style(("sans-serif", 12).into_font().color(&BLACK));
    root.draw(&pie).map_err(draw_error)
}

fn draw_grouped_bars(
    root: &Area,
    labels: &[String],
    budget: &[f64],
    actual: &[f64],
) -> Result<(), ChartError> {
    let count = labels.len() as i32;
    let ceiling = value_ceiling(budget).max(value_ceiling(actual));

    let mut chart = ChartBuilder::on(root)
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d((0..count).into_segmented(), 0.0..ceiling)
        .map_err(draw_error)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc("Amount ($)")
        .y_label_formatter(&|v| format!("${:.0}", v))
        .x_label_formatter(&|v| segment_label(labels, v))
        .label_style(("sans-serif", 12, &PRIMARY))
        .axis_style(&AXIS_COLOR)
        .draw()
        .map_err(draw_error)?;

    // budget fills the left half of each category, actual the right half
    chart
        .draw_series(budget.iter().enumerate().map(|(i, v)| {
            let i = i as i32;
            Rectangle::new(
                [(SegmentValue::Exact(i), 0.0), (SegmentValue::CenterOf(i), *v)],
                BUDGET_COLOR.filled(),
            )
        }))
        .map_err(draw_error)?
        .label("Budget")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], BUDGET_COLOR.filled()));

    chart
        .draw_series(actual.iter().enumerate().map(|(i, v)| {
            let i = i as i32;
            Rectangle::new(
                [(SegmentValue::CenterOf(i), 0.0), (SegmentValue::Exact(i + 1), *v)],
                ACTUAL_COLOR.filled(),
            )
        }))
        .map_err(draw_error)?
        .label("Actual")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], ACTUAL_COLOR.filled()));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&AXIS_COLOR)
        .draw()
        .map_err(draw_error)
}

/// Top of the y axis: 10% headroom, never a zero-height range
fn value_ceiling(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(0.0_f64, f64::max);
    (max * 1.1).max(1.0)
}

fn palette_color(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

fn segment_label(labels: &[String], value: &SegmentValue<i32>) -> String {
    match value {
        SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
        _ => String::new(),
    }
}


// Drawing needs a real canvas
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount_canvas(id: &str) -> HtmlCanvasElement {
        let document = gloo::utils::document();
        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .unwrap()
            .dyn_into()
            .unwrap();
        canvas.set_id(id);
        canvas.set_width(400);
        canvas.set_height(300);
        document.body().unwrap().append_child(&canvas).unwrap();
        canvas
    }

    #[wasm_bindgen_test]
    fn test_draw_then_dispose_each_kind() {
        for slot in ChartSlot::ALL {
            mount_canvas(slot.canvas_id());
        }

        let specs = [
            (
                ChartSlot::MonthlyTrends,
                ChartSpec::Line {
                    labels: vec!["Jan 2024".into(), "Feb 2024".into()],
                    values: vec![120.0, 80.5],
                    series: "Total Spending".into(),
                },
            ),
            (
                ChartSlot::CategoryBreakdown,
                ChartSpec::Pie {
                    labels: vec!["Groceries".into(), "Gas".into()],
                    values: vec![300.0, 60.0],
                },
            ),
            (
                ChartSlot::BudgetVsActual,
                ChartSpec::GroupedBars {
                    labels: vec!["Groceries".into()],
                    budget: vec![400.0],
                    actual: vec![310.0],
                },
            ),
        ];

        for (slot, spec) in specs {
            let mut handle = CanvasChartPainter.draw(slot, &spec).unwrap();
            handle.dispose();
        }
    }

    #[wasm_bindgen_test]
    fn test_empty_spec_still_yields_a_handle() {
        mount_canvas("empty-chart-test");
        let canvas = find_canvas("empty-chart-test").unwrap();
        assert_eq!(canvas.width(), 400);

        let spec = ChartSpec::Pie {
            labels: vec![],
            values: vec![],
        };
        let mut handle = CanvasChartPainter
            .draw(ChartSlot::CategoryBreakdown, &spec)
            .unwrap();
        handle.dispose();
    }

    #[wasm_bindgen_test]
    fn test_unknown_canvas_is_reported() {
        assert_eq!(
            find_canvas("no-such-chart").unwrap_err(),
            ChartError::CanvasMissing("no-such-chart".to_string())
        );
    }
}
