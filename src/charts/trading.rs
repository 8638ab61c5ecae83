use std::path::Path;

use ordered_float::OrderedFloat;
use plotters::{
    prelude::{BitMapBackend, Circle, EmptyElement, IntoDrawingArea},
    series::{AreaSeries, PointSeries},
    style::{Color, ShapeStyle},
};
use tracing::info;

use super::{theme, RenderView, Renderer};
use crate::{
    constants::CHART_DIMS,
    error::{EnvError, EnvResult},
    gym::Position,
};

/// Price line with a marker per tick: yellow while Low, blue while High.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ChartRenderer {
    prices: Vec<f64>,
    markers: Vec<(usize, Position)>,
    caption: String,
    first_rendering: bool,
}

impl ChartRenderer {
    pub fn new() -> Self {
        Self {
            first_rendering: true,
            ..Default::default()
        }
    }

    pub fn markers(&self) -> &[(usize, Position)] {
        &self.markers
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    fn push_marker(&mut self, tick: usize, position: Option<Position>) {
        if let Some(position @ (Position::Low | Position::High)) = position {
            self.markers.push((tick, position));
        }
    }
}

impl Renderer for ChartRenderer {
    fn render(&mut self, view: &RenderView) -> EnvResult<()> {
        if self.first_rendering {
            self.first_rendering = false;
            self.prices = view.prices.to_vec();
            self.markers.clear();
            self.push_marker(view.start_tick, view.position_at(view.start_tick));
        }

        self.push_marker(view.current_tick, view.position_at(view.current_tick));
        self.caption = view.caption();
        Ok(())
    }

    fn render_all(&mut self, view: &RenderView) -> EnvResult<()> {
        self.first_rendering = false;
        self.prices = view.prices.to_vec();
        self.markers.clear();
        for tick in 0..view.position_history.len() {
            self.push_marker(tick, view.position_at(tick));
        }
        self.caption = view.caption();
        Ok(())
    }

    fn save(&mut self, path: &Path) -> EnvResult<()> {
        draw_positions(path, &self.prices, &self.markers, &self.caption)
            .map_err(|err| EnvError::Render(err.to_string()))?;

        info!(path = %path.display(), markers = self.markers.len(), "saved rendering");
        Ok(())
    }

    fn close(&mut self) {
        *self = Self::new();
    }
}

fn draw_positions(
    path: &Path,
    prices: &[f64],
    markers: &[(usize, Position)],
    caption: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let root = BitMapBackend::new(path, CHART_DIMS).into_drawing_area();
    root.fill(&theme::BASE)?;

    let y_min = prices.iter().copied().map(OrderedFloat).min().map_or(0., |v| v.0);
    let y_max = prices.iter().copied().map(OrderedFloat).max().map_or(1., |v| v.0);
    let y_range = (y_max - y_min).max(0.01);
    let y_min = y_min - y_range * 0.05;
    let y_max = y_max + y_range * 0.05;

    let mut chart = plotters::chart::ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 20, &theme::TEXT))
        .margin(5)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(0..prices.len().max(1) as u32, y_min..y_max)?;

    chart
        .configure_mesh()
        .label_style(("sans-serif", 15, &theme::TEXT))
        .axis_style(&theme::SURFACE1)
        .light_line_style(&theme::SURFACE0)
        .draw()?;

    chart.draw_series(
        AreaSeries::new(
            prices
                .iter()
                .enumerate()
                .map(|(index, value)| (index as u32, *value)),
            y_min,
            theme::MAUVE.mix(0.2),
        )
        .border_style(ShapeStyle::from(&theme::MAUVE).stroke_width(1)),
    )?;

    let point_size = 3;

    for (position, color) in [(Position::Low, theme::YELLOW), (Position::High, theme::BLUE)] {
        chart.draw_series(PointSeries::of_element(
            markers
                .iter()
                .filter(|(_, marker)| *marker == position)
                .filter_map(|(tick, _)| prices.get(*tick).map(|price| (*tick as u32, *price))),
            point_size,
            color.mix(0.9).filled(),
            &|coord, size, style| EmptyElement::at(coord) + Circle::new((0, 0), size, style),
        ))?;
    }

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view<'a>(prices: &'a [f64], history: &'a [Option<Position>], tick: usize) -> RenderView<'a> {
        RenderView {
            prices,
            position_history: history,
            start_tick: 2,
            current_tick: tick,
            total_reward: 1.5,
            total_value: 100.,
        }
    }

    #[test]
    fn first_render_marks_the_start_position() {
        let prices = [10., 11., 9., 12.];
        let history = [None, None, Some(Position::Low), Some(Position::High)];
        let mut renderer = ChartRenderer::new();

        renderer.render(&view(&prices, &history[..3], 2)).unwrap();
        renderer.render(&view(&prices, &history, 3)).unwrap();

        assert_eq!(
            renderer.markers(),
            &[(2, Position::Low), (2, Position::Low), (3, Position::High)]
        );
        assert_eq!(
            renderer.caption(),
            "Total Reward: 1.500000 ~ Total Value: 100.000000"
        );
    }

    #[test]
    fn render_all_skips_padding_and_middle() {
        let prices = [10., 11., 9., 12., 13.];
        let history = [
            None,
            None,
            Some(Position::Low),
            Some(Position::Middle),
            Some(Position::High),
        ];
        let mut renderer = ChartRenderer::new();
        renderer.render_all(&view(&prices, &history, 4)).unwrap();

        assert_eq!(renderer.markers(), &[(2, Position::Low), (4, Position::High)]);

        renderer.close();
        assert_eq!(renderer, ChartRenderer::new());
    }
}
