//! Render a labelled rectangle at a few zoom levels and print the SVG.
//!
//! ```text
//! cargo run --example textbox --features tracing -- "Some label text" 14
//! ```

use miette::IntoDiagnostic;
use textbox::{LatLng, LatLngBounds, Map, MapView, SvgSurface, TextBox, Zoom};
use tracing_subscriber::EnvFilter;

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let text = args
        .next()
        .unwrap_or_else(|| "Hyde Park, with the Serpentine running through it".to_string());
    let zoom: f64 = match args.next() {
        Some(zoom) => zoom.parse().into_diagnostic()?,
        None => 13.0,
    };

    let view = MapView::try_new(LatLng::new(51.507, -0.165), zoom, 800.0, 600.0)?;
    let mut map = Map::new(view, SvgSurface::new(800.0, 600.0));

    let bounds = LatLngBounds::new(LatLng::new(51.502, -0.180), LatLng::new(51.512, -0.150));
    let id = map.add_layer(TextBox::new(bounds));
    map.set_text(id, Some(&text), None);
    println!("{}", map.to_svg_string());

    // Same label, one zoom level closer
    map.set_zoom(Zoom(zoom + 1.0));
    println!("{}", map.to_svg_string());
    Ok(())
}
