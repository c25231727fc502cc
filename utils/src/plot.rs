use anyhow::{bail, Context};
use structopt::StructOpt;

use std::path::PathBuf;

use plotters::prelude::*;

use rationals::{
    logger::{LogLevel, Logger},
    Rational, RationalConfig, Version,
};

use crate::reference;

const FITTED_COLOUR: RGBColor = RGBColor(214, 39, 40);
const REFERENCE_COLOUR: RGBColor = RGBColor(31, 119, 180);

const LEGEND_STROKE_WIDTH: u32 = 3;
const LINE_STROKE_WIDTH: u32 = 2;

const X_LABEL_AREA_SIZE: i32 = 60;
const Y_LABEL_AREA_SIZE: i32 = 70;
const LEGEND_AREA_SIZE: i32 = 60;
const LEGEND_DRAW_OFFSET: i32 = 30;

const TITLE_FONT_SIZE: i32 = 40;
const LABEL_FONT_SIZE: i32 = 25;
const TICKS_FONT_SIZE: i32 = 20;

const FONT: &str = "sans-serif";

const MARGIN: i32 = 20;

const IMG_DIMS: (u32, u32) = (1280, 720);

const POINTS: usize = 601;

#[derive(StructOpt)]
pub struct PlotOptions {
    /// Function whose tuned coefficients to plot
    #[structopt(long, default_value = "leaky_relu")]
    func: String,
    /// Formula variant (A, B, C or D)
    #[structopt(long, default_value = "A")]
    version: Version,
    /// Numerator degree
    #[structopt(long, default_value = "5")]
    numerator: usize,
    /// Denominator degree
    #[structopt(long, default_value = "4")]
    denominator: usize,
    /// Lower end of the plotted range
    #[structopt(long, default_value = "-3.0", allow_hyphen_values = true)]
    min: f32,
    /// Upper end of the plotted range
    #[structopt(long, default_value = "3.0", allow_hyphen_values = true)]
    max: f32,
    /// Output image path
    #[structopt(long, default_value = "rational.png", parse(from_os_str))]
    output: PathBuf,
    /// Log sampling detail
    #[structopt(long)]
    verbose: bool,
}

impl PlotOptions {
    pub fn run(&self) -> anyhow::Result<()> {
        let level = if self.verbose { LogLevel::Debug } else { LogLevel::Info };
        let logger = Logger::new("plot", level).show_name(true);

        if self.min >= self.max {
            bail!("Empty plotting range: {} >= {}!", self.min, self.max);
        }

        let config = RationalConfig {
            approx_func: self.func.clone(),
            degrees: (self.numerator, self.denominator),
            version: self.version,
            ..Default::default()
        };
        let rational = Rational::new(config)?;

        let step = (self.max - self.min) / (POINTS - 1) as f32;
        let xs: Vec<f32> = (0..POINTS).map(|i| self.min + i as f32 * step).collect();
        let fitted: Vec<(f32, f32)> = xs.iter().map(|&x| (x, rational.evaluate(x))).collect();
        let reference: Option<Vec<(f32, f32)>> =
            reference::eval(&self.func).map(|f| xs.iter().map(|&x| (x, f(x))).collect());

        logger.debug(&format!("sampled {POINTS} points on [{}, {}]", self.min, self.max));
        if reference.is_none() {
            logger.warn(&format!(
                "no closed-form reference for '{}', plotting the fit alone",
                self.func
            ));
        }

        let mut y_min = f32::INFINITY;
        let mut y_max = f32::NEG_INFINITY;
        for &(_, y) in fitted.iter().chain(reference.iter().flatten()) {
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
        let pad = 0.05 * (y_max - y_min).max(0.1);

        let root = BitMapBackend::new(&self.output, IMG_DIMS).into_drawing_area();
        root.fill(&WHITE).with_context(|| "Failed to clear the drawing area.")?;

        let caption = format!(
            "{} | version {} | degrees ({}, {})",
            self.func, self.version, self.numerator, self.denominator
        );
        let mut chart = ChartBuilder::on(&root)
            .caption(caption, (FONT, TITLE_FONT_SIZE))
            .margin(MARGIN)
            .x_label_area_size(X_LABEL_AREA_SIZE)
            .y_label_area_size(Y_LABEL_AREA_SIZE)
            .build_cartesian_2d(self.min..self.max, (y_min - pad)..(y_max + pad))?;

        chart
            .configure_mesh()
            .x_label_style((FONT, TICKS_FONT_SIZE).into_font())
            .y_label_style((FONT, TICKS_FONT_SIZE).into_font())
            .axis_desc_style((FONT, LABEL_FONT_SIZE).into_font())
            .x_desc("x")
            .y_desc("y")
            .draw()?;

        chart
            .draw_series(LineSeries::new(
                fitted.iter().copied(),
                ShapeStyle::from(FITTED_COLOUR).stroke_width(LINE_STROKE_WIDTH),
            ))?
            .label("rational")
            .legend(|(x, y)| {
                PathElement::new(
                    [(x, y), (x + LEGEND_DRAW_OFFSET, y)],
                    ShapeStyle::from(FITTED_COLOUR).stroke_width(LEGEND_STROKE_WIDTH),
                )
            });

        if let Some(reference) = &reference {
            chart
                .draw_series(LineSeries::new(
                    reference.iter().copied(),
                    ShapeStyle::from(REFERENCE_COLOUR).stroke_width(LINE_STROKE_WIDTH),
                ))?
                .label(self.func.as_str())
                .legend(|(x, y)| {
                    PathElement::new(
                        [(x, y), (x + LEGEND_DRAW_OFFSET, y)],
                        ShapeStyle::from(REFERENCE_COLOUR).stroke_width(LEGEND_STROKE_WIDTH),
                    )
                });
        }

        chart
            .configure_series_labels()
            .border_style(BLACK)
            .background_style(WHITE.mix(0.8))
            .position(SeriesLabelPosition::UpperLeft)
            .legend_area_size(LEGEND_AREA_SIZE)
            .draw()?;
        root.present()?;

        logger.info(&format!("wrote {}", self.output.display()));
        Ok(())
    }
}
