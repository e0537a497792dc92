use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

/// Raw form values after numeric coercion. Range checks happen in the
/// ledger, not here.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkoutDraft {
    Running {
        distance_km: f64,
        duration_min: f64,
        cadence_spm: f64,
    },
    Cycling {
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
    },
}

#[derive(Clone, Copy, PartialEq)]
enum TypeChoice {
    Running,
    Cycling,
}

pub enum FormMsg {
    TypeChanged,
    Submit,
}

pub struct WorkoutForm {
    choice: TypeChoice,
    type_ref: NodeRef,
    distance_ref: NodeRef,
    duration_ref: NodeRef,
    cadence_ref: NodeRef,
    elevation_ref: NodeRef,
}

#[derive(PartialEq, Properties, Clone)]
pub struct Props {
    pub submit: Callback<WorkoutDraft>,
}

impl Component for WorkoutForm {
    type Message = FormMsg;
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            choice: TypeChoice::Running,
            type_ref: NodeRef::default(),
            distance_ref: NodeRef::default(),
            duration_ref: NodeRef::default(),
            cadence_ref: NodeRef::default(),
            elevation_ref: NodeRef::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            FormMsg::TypeChanged => {
                let value = self
                    .type_ref
                    .cast::<HtmlSelectElement>()
                    .map(|select| select.value());
                self.choice = match value.as_deref() {
                    Some("cycling") => TypeChoice::Cycling,
                    _ => TypeChoice::Running,
                };
                true
            }
            FormMsg::Submit => {
                let distance_km = number(&self.distance_ref);
                let duration_min = number(&self.duration_ref);
                let draft = match self.choice {
                    TypeChoice::Running => WorkoutDraft::Running {
                        distance_km,
                        duration_min,
                        cadence_spm: number(&self.cadence_ref),
                    },
                    TypeChoice::Cycling => WorkoutDraft::Cycling {
                        distance_km,
                        duration_min,
                        elevation_gain_m: number(&self.elevation_ref),
                    },
                };
                ctx.props().submit.emit(draft);
                false
            }
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, first_render: bool) {
        // The form mounts when the user clicks the map; put them straight
        // into the distance field.
        if first_render {
            if let Some(input) = self.distance_ref.cast::<HtmlInputElement>() {
                let _ = input.focus();
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let onsubmit = link.callback(|event: SubmitEvent| {
            event.prevent_default();
            FormMsg::Submit
        });
        let onchange = link.callback(|_: Event| FormMsg::TypeChanged);

        let (cadence_row, elevation_row) = match self.choice {
            TypeChoice::Running => ("form__row", "form__row form__row--hidden"),
            TypeChoice::Cycling => ("form__row form__row--hidden", "form__row"),
        };

        html! {
            <form class="form" {onsubmit}>
                <div class="form__row">
                    <label class="form__label">{"Type"}</label>
                    <select
                        class="form__input form__input--type"
                        ref={self.type_ref.clone()}
                        {onchange}>
                        <option value="running">{"Running"}</option>
                        <option value="cycling">{"Cycling"}</option>
                    </select>
                </div>
                <div class="form__row">
                    <label class="form__label">{"Distance"}</label>
                    <input
                        class="form__input form__input--distance"
                        placeholder="km"
                        ref={self.distance_ref.clone()} />
                </div>
                <div class="form__row">
                    <label class="form__label">{"Duration"}</label>
                    <input
                        class="form__input form__input--duration"
                        placeholder="min"
                        ref={self.duration_ref.clone()} />
                </div>
                <div class={cadence_row}>
                    <label class="form__label">{"Cadence"}</label>
                    <input
                        class="form__input form__input--cadence"
                        placeholder="step/min"
                        ref={self.cadence_ref.clone()} />
                </div>
                <div class={elevation_row}>
                    <label class="form__label">{"Elev Gain"}</label>
                    <input
                        class="form__input form__input--elevation"
                        placeholder="meters"
                        ref={self.elevation_ref.clone()} />
                </div>
                <button class="form__btn" type="submit">{"OK"}</button>
            </form>
        }
    }
}

// Mirrors a numeric form field: anything unparseable becomes NaN and is
// rejected by validation as non-finite.
fn number(input: &NodeRef) -> f64 {
    input
        .cast::<HtmlInputElement>()
        .map(|input| input.value())
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(f64::NAN)
}
