//! Label a whole group at once; markers in the group are left alone.

use textbox::{
    CircleMarker, LabelOptions, LatLng, LatLngBounds, LayerGroup, Map, MapLayer, MapView, Px,
    SvgSurface, TextBox, Zoom,
};
use tracing_subscriber::EnvFilter;

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let center = LatLng::new(40.7829, -73.9654);
    let view = MapView::try_new(center, 14.0, 640.0, 480.0)?;
    let mut map = Map::new(view, SvgSurface::new(640.0, 480.0));

    let plots = (0..3).map(|i| {
        let south = 40.775 + i as f64 * 0.006;
        MapLayer::from(TextBox::new(LatLngBounds::new(
            LatLng::new(south, -73.975),
            LatLng::new(south + 0.004, -73.960),
        )))
    });
    let id = map.add_layer(LayerGroup::with_layers(plots));
    map.add_to_group(id, CircleMarker::new(center, Px(6.0)));

    let options = LabelOptions::default()
        .with_fill_color("darkgreen")
        .with_attribute("font-weight", "bold");
    map.set_text(id, Some("Community garden plot"), Some(options));
    map.pan_by(40.0, 0.0);
    map.set_zoom(Zoom(15.0));

    println!("{}", map.to_svg_string());
    Ok(())
}
