#![cfg(feature = "web")]
use crate::colors::{ColorMap, Rgb};
use crate::series::ChartSeries;
use plotters::prelude::*;

/// Configuration options for chart rendering
#[derive(Clone, Debug)]
pub struct GraphOptions {
    /// Caption displayed at the top of the chart; may be empty
    pub title: String,

    /// Label for the X-axis
    pub x_label: String,

    /// Label for the Y-axis
    pub y_label: String,

    /// Width of the chart in pixels
    pub width: u32,

    /// Height of the chart in pixels
    pub height: u32,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            title: String::new(),
            x_label: "Country".to_string(),
            y_label: "Total Module Cost USD/Wp".to_string(),
            width: 1000,
            height: 600,
        }
    }
}

/// Renders a stacked bar chart as PNG bytes
///
/// Each category becomes one stacked layer across all groups, bottom to
/// top in category order, coloured through `colors`. Absent values leave
/// a gap in their stack. Identical input gives identical output.
///
/// # Arguments
/// * `series` - Data to plot; one bar per group
/// * `options` - Caption, axis labels and pixel size
/// * `colors` - Category colours; unknown categories use the fallback colour
///
/// # Returns
/// * A Result containing the PNG image data as bytes or an error
pub fn render_stacked_bar(
    series: &ChartSeries,
    options: &GraphOptions,
    colors: &ColorMap,
) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    if series.groups.is_empty() {
        return Err("nothing to plot: the series has no groups".into());
    }

    let (width, height) = (options.width, options.height);
    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;

        let n = series.groups.len();
        let (low, high) = series.value_bounds();
        let pad = ((high - low) * 0.08).max(0.01);
        let y_start = if low < 0.0 { low - pad } else { 0.0 };
        let y_range = y_start..high + pad;
        let x_range = -0.5..n as f64 - 0.5;

        let mut chart = ChartBuilder::on(&root)
            .caption(&options.title, ("sans-serif", 24).into_font())
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range, y_range)?;

        // Only integral positions carry a group label
        let group_label = |x: &f64| {
            let i = x.round();
            if (x - i).abs() > 1e-6 || i < 0.0 {
                return String::new();
            }
            series.groups.get(i as usize).cloned().unwrap_or_default()
        };

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n)
            .x_label_formatter(&group_label)
            .x_desc(&options.x_label)
            .y_desc(&options.y_label)
            .draw()?;

        let segments = series.stacked_segments();
        for (c, label) in series.categories.iter().enumerate() {
            let color = to_plotters(colors.color_for(label));
            let bars = segments.iter().filter(|s| s.category == c).map(|s| {
                let x = s.group as f64;
                Rectangle::new([(x - 0.35, s.bottom), (x + 0.35, s.top)], color.filled())
            });

            chart
                .draw_series(bars)?
                .label(label.as_str())
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
                });
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.85))
            .border_style(BLACK)
            .draw()?;

        root.present()?;
    }

    encode_png(buffer, width, height)
}

fn to_plotters(rgb: Rgb) -> RGBColor {
    RGBColor(rgb.0, rgb.1, rgb.2)
}

fn encode_png(
    buffer: Vec<u8>,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    use std::io::Cursor;

    let image = image::RgbImage::from_raw(width, height, buffer)
        .ok_or("bitmap buffer does not match the chart size")?;
    let mut png = Vec::new();
    image::DynamicImage::ImageRgb8(image)
        .write_to(&mut Cursor::new(&mut png), image::ImageOutputFormat::Png)?;
    Ok(png)
}
