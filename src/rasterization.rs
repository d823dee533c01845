use crate::{
    error::Result,
    grid::{GridGeometry, LabelGrid},
    infill::{GrowthReport, grow},
    palette::ColorRegistry,
    params::MapParams,
    projection::Extent,
    render::render,
    shared_types::Point,
};
use image::RgbaImage;
use log::info;

pub struct RenderedMap {
    pub grid: LabelGrid,
    pub image: RgbaImage,
    pub growth: Option<GrowthReport>,
}

/// Sizes a grid from the extent of `points` and accumulates them in order.
pub fn accumulate(points: &[Point], params: &MapParams) -> Result<LabelGrid> {
    info!("Finding bounds of {} points to size storage", points.len());

    let extent = Extent::of(points.iter().map(Point::projected))?;

    let geometry = GridGeometry::new(extent, params.grid_width, params.grid_height)?;

    info!(
        "Extent {extent:?}, storage ratio {:.3}x{:.3}",
        geometry.x_storage_ratio(),
        geometry.y_storage_ratio()
    );

    let mut grid = LabelGrid::new(geometry);

    for point in points {
        grid.accumulate(point.projected(), &point.label)?;
    }

    let stats = grid.stats();

    info!(
        "Accumulated {} points into {} cells with {} labels",
        stats.point_count,
        stats.unique_cell_count,
        grid.label_names().len()
    );

    Ok(grid)
}

/// Full pipeline from points to image.
pub fn rasterize(points: &[Point], params: &MapParams) -> Result<RenderedMap> {
    let mut grid = accumulate(points, params)?;

    let growth = params.grow.then(|| {
        let report = grow(&mut grid, params.pix_growth_max);

        info!(
            "Grew {} cells in {} passes, widest lookback {}",
            report.infills, report.passes, report.max_lookback
        );

        report
    });

    let mut colors = ColorRegistry::new(params.seed);

    let image = render(
        &grid,
        params.image_width,
        params.image_height,
        params.background,
        &mut colors,
    )?;

    Ok(RenderedMap {
        grid,
        image,
        growth,
    })
}
