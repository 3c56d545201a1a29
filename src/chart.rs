//! Temperature chart rendering on the plotters SVG backend

use std::fs;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use tracing::{debug, info};

use crate::Result;
use crate::config::ChartConfig;
use crate::error::CitycastError;
use crate::models::ForecastDay;

/// Fixed chart title
const CHART_TITLE: &str = "5-Day Temperature Forecast";

/// Handle to the currently rendered chart artifact.
///
/// At most one is alive at a time: [`draw_temperature_chart`] tears down the
/// previous handle's artifact before drawing the replacement. The caller
/// owns the handle and passes it back in on the next draw.
#[derive(Debug)]
pub struct ChartHandle {
    path: PathBuf,
}

impl ChartHandle {
    /// Path of the rendered SVG
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Tear down the artifact this handle points at.
    ///
    /// A file that is already gone does not count as a failure.
    pub fn destroy(self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Draw the two-series min/max temperature line chart.
///
/// The minimum series is drawn in blue, the maximum series in red, both
/// without area fill, over the shared date labels, with a top-positioned
/// legend and the fixed title. Any previous chart is torn down first.
pub fn draw_temperature_chart(
    previous: Option<ChartHandle>,
    days: &[ForecastDay],
    options: &ChartConfig,
) -> Result<ChartHandle> {
    if days.is_empty() {
        return Err(CitycastError::chart("no forecast days to draw"));
    }

    if let Some(old) = previous {
        debug!("Tearing down previous chart at {}", old.path().display());
        old.destroy()?;
    }

    let path = PathBuf::from(&options.output_path);
    render_svg(days, &path, options.width, options.height)
        .map_err(|e| CitycastError::chart(e.to_string()))?;

    info!("Chart written to {}", path.display());
    Ok(ChartHandle { path })
}

fn render_svg(
    days: &[ForecastDay],
    path: &Path,
    width: u32,
    height: u32,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let labels: Vec<String> = days.iter().map(|day| day.date.to_string()).collect();

    let (min_temp, max_temp) = days.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(min, max), day| (min.min(day.temp_min_c), max.max(day.temp_max_c)),
    );
    // Pad the y axis so flat series still get a visible band
    let y_padding = if (max_temp - min_temp).abs() > 1e-6 {
        (max_temp - min_temp) * 0.1
    } else {
        1.0
    };
    let last_index = days.len().saturating_sub(1).max(1);

    let root = SVGBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(CHART_TITLE, ("sans-serif", 28))
        .margin(16)
        .x_label_area_size(36)
        .y_label_area_size(48)
        .build_cartesian_2d(
            0..last_index,
            (min_temp - y_padding)..(max_temp + y_padding),
        )?;

    chart
        .configure_mesh()
        .x_labels(days.len())
        .x_label_formatter(&|idx: &usize| labels.get(*idx).cloned().unwrap_or_default())
        .y_desc("Temperature (°C)")
        .light_line_style(BLACK.mix(0.15))
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            days.iter().enumerate().map(|(i, day)| (i, day.temp_min_c)),
            BLUE,
        ))?
        .label("Min Temp (°C)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], BLUE));

    chart
        .draw_series(LineSeries::new(
            days.iter().enumerate().map(|(i, day)| (i, day.temp_max_c)),
            RED,
        ))?
        .label("Max Temp (°C)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], RED));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperMiddle)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
