//! orbmap CLI: render uncertainty maps from a RON request file.
//!
//! Usage: `orbmap <request.ron>`. The request names the object, epoch and
//! canvas geometry; the point list is loaded from the request's points
//! directory. Output lands in the request's output directory, named
//! `{object}-{timestamp}.png` (plus a `-field.png` overview when asked).

use std::path::Path;

use anyhow::{bail, Context};
use log::info;

use orbmap::config::RenderRequest;
use orbmap::points::{FilePointProvider, PointProvider, PointQuery, SkyPoint};
use orbmap::render::{MapSpec, UncertaintyMap, Windowing};
use orbmap::time::{output_file_name, overview_file_name, Timestamp};

fn main() -> anyhow::Result<()> {
    setup_logging("info")?;
    info!("orbmap v{}", orbmap::VERSION);

    let args: Vec<String> = std::env::args().collect();
    let Some(request_path) = args.get(1) else {
        bail!("usage: orbmap <request.ron>");
    };

    let request = RenderRequest::load(request_path)
        .with_context(|| format!("reading request {request_path}"))?;
    request.validate()?;

    let timestamp = Timestamp::parse_iso(&request.image_date)?;
    let julian_date = timestamp.julian_date();
    info!(
        "rendering {} at {} (jd {:.5})",
        request.object_name, timestamp, julian_date
    );

    // a failed point query aborts before any renderer is constructed
    let provider = FilePointProvider::new(&request.points_dir);
    let set = provider
        .load(&PointQuery {
            object_id: request.object_name.clone(),
            julian_date,
            observatory_code: request.observatory_code.clone(),
        })
        .context("point-list query failed")?;

    let background = request.bg_color.resolve()?;
    let (center_ra_offset, center_de_offset) = request.center_offsets(&set)?;

    std::fs::create_dir_all(&request.output_dir)
        .with_context(|| format!("creating output directory {}", request.output_dir.display()))?;

    let spec = MapSpec {
        center_ra_offset,
        center_de_offset,
        flip_ra: request.flip_horizontally,
        flip_de: request.flip_vertically,
        background,
        ..MapSpec::new(
            request.image_width,
            request.image_height,
            request.field_width,
            request.field_height,
        )
    };
    let name = output_file_name(&request.object_name, &timestamp);
    render_map(
        spec,
        &set.offsets,
        Windowing::Clipped,
        &request.output_dir.join(&name),
    )?;

    if request.overview {
        let mut spec = MapSpec::full_field(
            request.image_width,
            request.image_height,
            &set.offsets,
            background,
        );
        spec.flip_ra = request.flip_horizontally;
        spec.flip_de = request.flip_vertically;
        let name = overview_file_name(&request.object_name, &timestamp);
        render_map(
            spec,
            &set.offsets,
            Windowing::FullField,
            &request.output_dir.join(&name),
        )?;
    }

    Ok(())
}

fn render_map(
    spec: MapSpec,
    points: &[SkyPoint],
    windowing: Windowing,
    path: &Path,
) -> anyhow::Result<()> {
    let mut map = UncertaintyMap::new(spec, points.to_vec(), windowing)?;
    map.draw()?;
    map.save(path)?;
    info!("saved {}", path.display());
    Ok(())
}

fn setup_logging(base_level: &str) -> anyhow::Result<()> {
    flexi_logger::Logger::try_with_env_or_str(base_level)?
        .start()
        .context("logger initialization failed")?;
    Ok(())
}
