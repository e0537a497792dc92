use workout_tracker_lib::workout::{WorkoutKind, WorkoutRecord};
use yew::prelude::*;

use crate::components::workout_form::{WorkoutDraft, WorkoutForm};

pub struct Panel;

#[derive(PartialEq, Properties, Clone)]
pub struct Props {
    pub workouts: Vec<WorkoutRecord>,
    pub form_open: bool,
    pub submit_workout: Callback<WorkoutDraft>,
    pub select_workout: Callback<i64>,
}

impl Component for Panel {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Panel
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();

        html! {
            <div class="sidebar component-container">
                <h1 class="logo">{"Workout Tracker"}</h1>
                if props.form_open {
                    <WorkoutForm submit={props.submit_workout.clone()} />
                } else if props.workouts.is_empty() {
                    <p class="hint">{"Click the map to log a workout."}</p>
                }
                <ul class="workouts">
                    { for props.workouts.iter().map(|workout| workout_item(ctx, workout)) }
                </ul>
            </div>
        }
    }
}

fn workout_item(ctx: &Context<Panel>, workout: &WorkoutRecord) -> Html {
    let workout_id = workout.workout_id;
    let select = ctx.props().select_workout.clone();
    let onclick = Callback::from(move |_| select.emit(workout_id));

    let details = match workout.kind {
        WorkoutKind::Running {
            cadence_spm,
            pace_min_per_km,
        } => [
            ("🏃‍♂️", format!("{}", workout.distance_km), "km"),
            ("⏱", format!("{}", workout.duration_min), "min"),
            ("⚡️", format!("{:.1}", pace_min_per_km), "min/km"),
            ("🦶🏼", format!("{:.0}", cadence_spm), "spm"),
        ],
        WorkoutKind::Cycling {
            elevation_gain_m,
            speed_km_per_h,
        } => [
            ("🚴‍♀️", format!("{}", workout.distance_km), "km"),
            ("⏱", format!("{}", workout.duration_min), "min"),
            ("⚡️", format!("{:.1}", speed_km_per_h), "km/h"),
            ("⛰", format!("{:.0}", elevation_gain_m), "m"),
        ],
    };

    html! {
        <li
            class={format!("workout workout--{}", workout.type_name())}
            key={workout.workout_id}
            {onclick}>
            <h2 class="workout__title">{workout.description()}</h2>
            { for details.iter().map(|(icon, value, unit)| html! {
                <div class="workout__details">
                    <span class="workout__icon">{*icon}</span>
                    <span class="workout__value">{value.clone()}</span>
                    <span class="workout__unit">{*unit}</span>
                </div>
            }) }
        </li>
    }
}
