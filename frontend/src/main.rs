use chrono::Utc;
use geo_types::Point;
use gloo_console::info;
use gloo_utils::window;
use workout_tracker_lib::ledger::WorkoutLedger;
use yew::prelude::*;

use crate::components::{
    map_component::{MapComponent, MapFocus},
    panel::Panel,
    workout_form::WorkoutDraft,
};

mod components;
mod geolocation;

enum MainMsg {
    PositionAcquired(f64, f64),
    PositionUnavailable,
    MapClicked(f64, f64),
    SubmitWorkout(WorkoutDraft),
    FocusWorkout(i64),
}

struct Model {
    ledger: WorkoutLedger,
    // Map center, known once the position provider answers.
    position: Option<(f64, f64)>,
    // Most recent unhandled map click; the next form submit consumes it.
    pending_click: Option<(f64, f64)>,
    focus: Option<MapFocus>,
}

impl Component for Model {
    type Message = MainMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link();
        geolocation::request_position(
            link.callback(|(latitude, longitude)| MainMsg::PositionAcquired(latitude, longitude)),
            link.callback(|()| MainMsg::PositionUnavailable),
        );

        Self {
            ledger: WorkoutLedger::new(),
            position: None,
            pending_click: None,
            focus: None,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            MainMsg::PositionAcquired(latitude, longitude) => {
                info!(format!("https://www.google.com/maps/@{latitude},{longitude}"));
                self.position = Some((latitude, longitude));
                true
            }
            MainMsg::PositionUnavailable => {
                // Terminal for the map flow, the rest of the session stays up.
                alert("Could not get your position!");
                false
            }
            MainMsg::MapClicked(latitude, longitude) => {
                self.pending_click = Some((latitude, longitude));
                true
            }
            MainMsg::SubmitWorkout(draft) => self.log_workout(draft),
            MainMsg::FocusWorkout(workout_id) => self.focus_workout(workout_id),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let submit_workout = link.callback(MainMsg::SubmitWorkout);
        let select_workout = link.callback(MainMsg::FocusWorkout);
        let on_map_click =
            link.callback(|(latitude, longitude)| MainMsg::MapClicked(latitude, longitude));

        html! { <>
            <Panel
                workouts={self.ledger.all().to_vec()}
                form_open={self.pending_click.is_some()}
                submit_workout={submit_workout}
                select_workout={select_workout} />
            if let Some(center) = self.position {
                <MapComponent
                    center={center}
                    workouts={self.ledger.all().to_vec()}
                    focus={self.focus.clone()}
                    on_click={on_map_click} />
            }
        </> }
    }
}

impl Model {
    fn log_workout(&mut self, draft: WorkoutDraft) -> bool {
        let Some((latitude, longitude)) = self.pending_click else {
            // A submit without a preceding map click has nowhere to go.
            return false;
        };
        let position = Point::new(longitude, latitude);
        let timestamp = Utc::now();

        let result = match draft {
            WorkoutDraft::Running {
                distance_km,
                duration_min,
                cadence_spm,
            } => self
                .ledger
                .create_running(position, timestamp, distance_km, duration_min, cadence_spm),
            WorkoutDraft::Cycling {
                distance_km,
                duration_min,
                elevation_gain_m,
            } => self.ledger.create_cycling(
                position,
                timestamp,
                distance_km,
                duration_min,
                elevation_gain_m,
            ),
        };

        match result {
            Ok(record) => {
                info!(format!("Logged {}", record.description()));
                self.pending_click = None;
                true
            }
            Err(err) => {
                // Inputs stay in the form so the user can correct them.
                alert(&err.to_string());
                false
            }
        }
    }

    fn focus_workout(&mut self, workout_id: i64) -> bool {
        let Some(record) = self
            .ledger
            .all()
            .iter()
            .find(|record| record.workout_id == workout_id)
        else {
            return false;
        };

        let generation = self.focus.as_ref().map_or(0, |focus| focus.generation + 1);
        self.focus = Some(MapFocus {
            generation,
            latitude: record.latitude(),
            longitude: record.longitude(),
        });
        true
    }
}

fn alert(message: &str) {
    let _ = window().alert_with_message(message);
}

fn main() {
    yew::Renderer::<Model>::new().render();
}
