use std::collections::HashMap;

use gloo_console::info;
use gloo_utils::document;
use leaflet::{LatLng, Map, MapOptions, Marker, MouseEvent, Popup, PopupOptions, TileLayer, TileLayerOptions};
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, Node};
use workout_tracker_lib::workout::{WorkoutKind, WorkoutRecord};
use yew::prelude::*;

const INITIAL_ZOOM: f64 = 13.0;

const TILE_URL: &str = "https://{s}.tile.openstreetmap.fr/hot/{z}/{x}/{y}.png";
const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// A panel click to pan to. The generation counter makes repeated clicks on
/// the same workout distinguishable in `changed`.
#[derive(Debug, Clone, PartialEq)]
pub struct MapFocus {
    pub generation: u32,
    pub latitude: f64,
    pub longitude: f64,
}

pub struct MapComponent {
    map: Map,
    container: HtmlElement,
    markers: HashMap<i64, Marker>,
    // Kept alive for as long as the map listens for clicks.
    _click_handler: Closure<dyn FnMut(MouseEvent)>,
}

#[derive(PartialEq, Properties, Clone)]
pub struct Props {
    pub center: (f64, f64),
    pub workouts: Vec<WorkoutRecord>,
    pub focus: Option<MapFocus>,
    pub on_click: Callback<(f64, f64)>,
}

impl MapComponent {
    fn render_map(&self) -> Html {
        let node: &Node = &self.container.clone().into();
        Html::VRef(node.clone())
    }
}

impl Component for MapComponent {
    type Message = ();
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        let container: Element = document().create_element("div").unwrap();
        let container: HtmlElement = container.dyn_into().unwrap();
        container.set_class_name("map");

        let map = Map::new_with_element(&container, &MapOptions::default());

        let on_click = ctx.props().on_click.clone();
        let click_handler = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            let latlng = event.lat_lng();
            on_click.emit((latlng.lat(), latlng.lng()));
        });
        map.on("click", click_handler.as_ref());

        Self {
            map,
            container,
            markers: HashMap::new(),
            _click_handler: click_handler,
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            let (latitude, longitude) = ctx.props().center;
            self.map
                .set_view(&LatLng::new(latitude, longitude), INITIAL_ZOOM);
            add_tile_layer(&self.map);
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        // The sidebar layout shifts when the form opens or closes.
        self.map.invalidate_size(false);
        let props = ctx.props();

        for workout in &props.workouts {
            if !self.markers.contains_key(&workout.workout_id) {
                let marker = place_marker(&self.map, workout);
                self.markers.insert(workout.workout_id, marker);
                info!(format!("Placed marker for {}", workout.description()));
            }
        }

        if props.focus != old_props.focus {
            if let Some(focus) = &props.focus {
                let zoom = self.map.get_zoom();
                self.map
                    .set_view(&LatLng::new(focus.latitude, focus.longitude), zoom);
            }
        }

        true
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <div class="map-wrapper">
                {self.render_map()}
            </div>
        }
    }
}

fn place_marker(map: &Map, workout: &WorkoutRecord) -> Marker {
    let opts = PopupOptions::default();
    opts.set_max_width(250.0);
    opts.set_min_width(100.0);
    opts.set_auto_close(false);
    opts.set_close_on_click(false);
    opts.set_class_name(format!("{}-popup", workout.type_name()));

    let icon = match workout.kind {
        WorkoutKind::Running { .. } => "🏃‍♂️",
        WorkoutKind::Cycling { .. } => "🚴‍♀️",
    };
    let popup = Popup::new(&opts, None);
    popup.set_content(&format!("{} {}", icon, workout.description()).into());

    let marker = Marker::new(&LatLng::new(workout.latitude(), workout.longitude()));
    marker.add_to(map);
    marker.bind_popup(&popup);
    marker.open_popup();
    marker
}

fn add_tile_layer(map: &Map) {
    let opts = TileLayerOptions::new();
    opts.set_attribution(TILE_ATTRIBUTION.into());
    opts.set_update_when_idle(true);
    TileLayer::new_options(TILE_URL, &opts).add_to(map);
}
