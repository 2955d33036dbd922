use slidegeom::host::MemorySlide;
use slidegeom::{Alignment, Angle, RotatedShape, ShapeHandle, ShapeKind, align};

fn main() -> miette::Result<()> {
    let filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(tracing::level_filters::LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let slide = MemorySlide::new();
    let mut shapes = Vec::new();
    for (i, degrees) in [0.0, 30.0, 90.0, 135.0].into_iter().enumerate() {
        let kind = if i % 2 == 0 { ShapeKind::AutoShape } else { ShapeKind::Picture };
        let mut handle = slide.add_shape(kind, 40.0 + 150.0 * i as f64, 60.0 + 25.0 * i as f64, 100.0, 50.0);
        handle.set_rotation(Angle(degrees))?;
        shapes.push(RotatedShape::attach(handle)?);
    }

    align(&mut shapes, Alignment::Top)?;
    tracing::info!(count = shapes.len(), "aligned rotated shapes on their top edges");

    for shape in &shapes {
        let tl = shape.top_left();
        println!(
            "{:<12} rotation {:>5} box {:>8.3} x {:<8.3} at ({:.3}, {:.3})",
            shape.name()?,
            shape.rotation()?.degrees(),
            shape.absolute_width().raw(),
            shape.absolute_height().raw(),
            tl.x.raw(),
            tl.y.raw(),
        );
    }
    Ok(())
}
