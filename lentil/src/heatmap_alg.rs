use crate::common::*;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontTransform;

pub const ACTIVATION_LEGEND: &str = "Topic activations";

const CELL_PX: i32 = 36;
const LEGEND_PX: i32 = 96;
const MARGIN_PX: i32 = 8;

/// Take the leading rows of a column, clipping silently when fewer
/// rows are available than requested.
pub fn bounded_sample<T>(column: &[T], limit: usize) -> &[T] {
    &column[..column.len().min(limit)]
}

/// Row-by-topic activation values with tick labels for both axes
pub struct HeatmapSpec {
    values: Mat,
    x_labels: Vec<Box<str>>,
    y_labels: Vec<Box<str>>,
    legend: Box<str>,
}

impl HeatmapSpec {
    /// One x label per topic column and one y label per sampled row
    pub fn new(
        values: Mat,
        x_labels: Vec<Box<str>>,
        y_labels: Vec<Box<str>>,
        legend: &str,
    ) -> anyhow::Result<Self> {
        anyhow::ensure!(
            values.nrows() > 0 && values.ncols() > 0,
            "empty activation matrix"
        );
        anyhow::ensure!(
            x_labels.len() == values.ncols(),
            "{} x labels for {} topic columns",
            x_labels.len(),
            values.ncols()
        );
        anyhow::ensure!(
            y_labels.len() == values.nrows(),
            "{} y labels for {} sampled rows",
            y_labels.len(),
            values.nrows()
        );
        Ok(Self {
            values,
            x_labels,
            y_labels,
            legend: legend.into(),
        })
    }

    pub fn pixel_size(&self) -> (u32, u32) {
        let kk = self.values.ncols() as i32;
        let nn = self.values.nrows() as i32;
        let width = label_px(&self.y_labels) + CELL_PX * kk + LEGEND_PX + 2 * MARGIN_PX;
        let height = CELL_PX * nn + label_px(&self.x_labels) + 2 * MARGIN_PX;
        (width as u32, height as u32)
    }

    fn value_range(&self) -> (f32, f32) {
        self.values
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }
}

pub fn render_svg(spec: &HeatmapSpec, file_path: &str) -> anyhow::Result<()> {
    let root = SVGBackend::new(file_path, spec.pixel_size()).into_drawing_area();
    draw_cells(&root, spec).map_err(|e| anyhow::anyhow!("svg heatmap: {}", e))
}

pub fn render_png(spec: &HeatmapSpec, file_path: &str) -> anyhow::Result<()> {
    let root = BitMapBackend::new(file_path, spec.pixel_size()).into_drawing_area();
    draw_cells(&root, spec).map_err(|e| anyhow::anyhow!("png heatmap: {}", e))
}

fn draw_cells<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spec: &HeatmapSpec,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let (width, _) = spec.pixel_size();
    let (plot_area, legend_area) = root.split_horizontally(width as i32 - LEGEND_PX);

    let nn = spec.values.nrows();
    let kk = spec.values.ncols();
    let (vmin, vmax) = spec.value_range();

    let mut chart = ChartBuilder::on(&plot_area)
        .margin(MARGIN_PX)
        .x_label_area_size(label_px(&spec.x_labels))
        .y_label_area_size(label_px(&spec.y_labels))
        .build_cartesian_2d(
            (0u32..kk as u32).into_segmented(),
            (0u32..nn as u32).into_segmented(),
        )?;

    let x_labels = &spec.x_labels;
    let y_labels = &spec.y_labels;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(kk)
        .y_labels(nn)
        .x_label_style(
            ("sans-serif", 11)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .y_label_style(("sans-serif", 11))
        .x_label_formatter(&|seg| segment_label(seg, x_labels))
        .y_label_formatter(&|seg| {
            // the matrix is drawn with row 0 at the top
            let flipped = flip_segment(seg, nn);
            segment_label(&flipped, y_labels)
        })
        .draw()?;

    let mut cells = Vec::with_capacity(nn * kk);
    for i in 0..nn {
        for k in 0..kk {
            let color = sample_gradient(
                &ACTIVATION_STOPS,
                unit_scale(spec.values[(i, k)], vmin, vmax),
            );
            cells.push(Rectangle::new(
                [
                    (
                        SegmentValue::Exact(k as u32),
                        SegmentValue::Exact((nn - 1 - i) as u32),
                    ),
                    (
                        SegmentValue::Exact((k + 1) as u32),
                        SegmentValue::Exact((nn - i) as u32),
                    ),
                ],
                color.filled(),
            ));
        }
    }
    chart.draw_series(cells)?;

    draw_colorbar(&legend_area, spec, vmin, vmax)?;
    root.present()?;
    Ok(())
}

fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    spec: &HeatmapSpec,
    vmin: f32,
    vmax: f32,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let bar_x0 = 10i32;
    let bar_x1 = 30i32;
    let bar_top = MARGIN_PX;
    let bar_h = spec.values.nrows() as i32 * CELL_PX;

    let steps = 64i32;
    for s in 0..steps {
        let t0 = s as f32 / steps as f32;
        let t1 = (s + 1) as f32 / steps as f32;
        let y0 = bar_top + (bar_h as f32 * t0) as i32;
        let y1 = bar_top + (bar_h as f32 * t1) as i32;
        // largest value at the top of the bar
        let color = sample_gradient(&ACTIVATION_STOPS, 1.0 - (t0 + t1) * 0.5);
        area.draw(&Rectangle::new([(bar_x0, y0), (bar_x1, y1)], color.filled()))?;
    }

    let tick_font = ("sans-serif", 11).into_font();
    area.draw(&Text::new(
        format!("{:.2}", vmax),
        (bar_x1 + 4, bar_top),
        tick_font.clone(),
    ))?;
    area.draw(&Text::new(
        format!("{:.2}", vmin),
        (bar_x1 + 4, bar_top + bar_h - 10),
        tick_font,
    ))?;

    let caption_font = ("sans-serif", 13)
        .into_font()
        .transform(FontTransform::Rotate270);
    area.draw(&Text::new(
        spec.legend.to_string(),
        (bar_x1 + 36, bar_top + bar_h / 2 + 48),
        caption_font,
    ))?;
    Ok(())
}

fn label_px(labels: &[Box<str>]) -> i32 {
    let longest = labels.iter().map(|x| x.chars().count()).max().unwrap_or(0) as i32;
    (24 + 7 * longest).min(420)
}

fn segment_label(seg: &SegmentValue<u32>, labels: &[Box<str>]) -> String {
    let idx = match seg {
        SegmentValue::CenterOf(v) | SegmentValue::Exact(v) => *v as usize,
        SegmentValue::Last => labels.len(),
    };
    labels.get(idx).map(|x| x.to_string()).unwrap_or_default()
}

fn flip_segment(seg: &SegmentValue<u32>, nn: usize) -> SegmentValue<u32> {
    let flip = |v: u32| nn.saturating_sub(v as usize + 1) as u32;
    match seg {
        SegmentValue::CenterOf(v) => SegmentValue::CenterOf(flip(*v)),
        SegmentValue::Exact(v) => SegmentValue::Exact(flip(*v)),
        SegmentValue::Last => SegmentValue::Last,
    }
}

#[derive(Clone, Copy)]
struct ColorStop {
    at: f32,
    color: (u8, u8, u8),
}

const ACTIVATION_STOPS: [ColorStop; 5] = [
    ColorStop {
        at: 0.0,
        color: (68, 1, 84),
    },
    ColorStop {
        at: 0.25,
        color: (59, 82, 139),
    },
    ColorStop {
        at: 0.5,
        color: (33, 145, 140),
    },
    ColorStop {
        at: 0.75,
        color: (94, 201, 98),
    },
    ColorStop {
        at: 1.0,
        color: (253, 231, 37),
    },
];

fn unit_scale(value: f32, vmin: f32, vmax: f32) -> f32 {
    let span = vmax - vmin;
    if span <= f32::EPSILON {
        return 0.0;
    }
    (value - vmin) / span
}

fn lerp_channel(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 + (b as f32 - a as f32) * t).round() as u8
}

fn sample_gradient(stops: &[ColorStop], value: f32) -> RGBColor {
    let clamped = value.clamp(0.0, 1.0);
    if clamped <= stops[0].at {
        let (r, g, b) = stops[0].color;
        return RGBColor(r, g, b);
    }
    for window in stops.windows(2) {
        if let [start, end] = window {
            if clamped <= end.at {
                let span = (end.at - start.at).max(f32::EPSILON);
                let t = (clamped - start.at) / span;
                let (r0, g0, b0) = start.color;
                let (r1, g1, b1) = end.color;
                return RGBColor(
                    lerp_channel(r0, r1, t),
                    lerp_channel(g0, g1, t),
                    lerp_channel(b0, b1, t),
                );
            }
        }
    }
    let (r, g, b) = stops[stops.len() - 1].color;
    RGBColor(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use table_util::common_io::create_temp_dir_file;

    fn toy_spec() -> HeatmapSpec {
        let values = Mat::from_row_slice(3, 2, &[0.9, 0.1, 0.2, 0.8, 0.5, 0.5]);
        HeatmapSpec::new(
            values,
            vec!["[manager, director]".into(), "[firefighter, rescuer]".into()],
            vec![
                "Manager".into(),
                "Firefighter".into(),
                "Bus Operator".into(),
            ],
            ACTIVATION_LEGEND,
        )
        .unwrap()
    }

    #[test]
    fn bounded_sample_clips_to_available_rows() {
        let column: Vec<usize> = (0..15).collect();
        assert_eq!(bounded_sample(&column, 20).len(), 15);
        assert_eq!(bounded_sample(&column, 3), &[0, 1, 2]);
        assert_eq!(bounded_sample(&column, 15).len(), 15);
    }

    #[test]
    fn label_counts_must_match_matrix_shape() {
        let values = Mat::from_element(2, 2, 0.5);
        let bad = HeatmapSpec::new(
            values,
            vec!["only one".into()],
            vec!["r0".into(), "r1".into()],
            ACTIVATION_LEGEND,
        );
        assert!(bad.is_err());

        let empty = HeatmapSpec::new(Mat::zeros(0, 0), vec![], vec![], ACTIVATION_LEGEND);
        assert!(empty.is_err());
    }

    #[test]
    fn gradient_covers_both_endpoints() {
        let lo = sample_gradient(&ACTIVATION_STOPS, -1.0);
        let hi = sample_gradient(&ACTIVATION_STOPS, 2.0);
        assert_eq!((lo.0, lo.1, lo.2), ACTIVATION_STOPS[0].color);
        assert_eq!((hi.0, hi.1, hi.2), ACTIVATION_STOPS[4].color);
    }

    #[test]
    fn svg_rendering_includes_legend_and_ticks() -> anyhow::Result<()> {
        let spec = toy_spec();
        let svg_file = create_temp_dir_file(".svg")?;
        let svg_file = svg_file.to_string_lossy().to_string();

        render_svg(&spec, &svg_file)?;

        let rendered = std::fs::read_to_string(&svg_file)?;
        assert!(rendered.contains("Topic activations"));
        assert!(rendered.contains("Firefighter"));
        Ok(())
    }

    #[test]
    fn sample_rows_follow_one_fitted_encoder() -> anyhow::Result<()> {
        use topic_encoder::hash_encoder::HashTopicEncoder;
        use topic_encoder::report::TopicReport;

        let dataset = EmployeeTitlesSample.fetch()?;
        let mut table = dataset.table;
        table.overlay_column("employee_position_title", "underfilled_job_title")?;
        let labels = table.dirty_column("employee_position_title")?;

        let config = EncoderConfig {
            n_components: 5,
            random_state: 42,
        };
        let mut encoder = HashTopicEncoder::new(config)?;
        let zz = encoder.fit_transform(&labels)?;

        let report = TopicReport::from_encoder(&encoder, 3)?;
        let sample = bounded_sample(&labels, 20);
        assert_eq!(sample.len(), 20);

        let activations = encoder.transform(sample)?;

        // the drawn block equals the leading rows of the fitted encoding
        approx::assert_abs_diff_eq!(
            &activations,
            &zz.rows(0, sample.len()).into_owned(),
            epsilon = 1e-6
        );

        let spec = HeatmapSpec::new(
            activations,
            report.group_labels(),
            sample.to_vec(),
            ACTIVATION_LEGEND,
        )?;
        let (width, height) = spec.pixel_size();
        assert!(width > 0 && height > 0);
        Ok(())
    }
}
