//! The filter session: selected filter, slider values, source and derived
//! image.
//!
//! Every mutation goes through an explicit setter that updates state and then
//! runs a single `reprocess` step, so the derived image is always the engine's
//! output for the current source and state. Nothing is deferred.
//!
//! ## Lifecycle
//!
//! ```text
//! Empty --load_source(Some)--> Loaded --select/set--> Edited
//!   ^                             |                      |
//!   +-------load_source(None)-----+----------------------+
//! ```

use serde::{Deserialize, Serialize};

use crate::collab::{ImageSink, ImageSource, SaveCallbacks};
use crate::config::{
    clamp_to, RadiusMapping, SessionConfig, SwitchPolicy, INTENSITY_RANGE, RADIUS_FROM_INTENSITY_FACTOR,
    RADIUS_RANGE, SCALE_FACTOR,
};
use crate::filter::{FilterEngine, FilterInputs, FilterKind, FilterSpec, ParameterKey, RasterEngine};
use crate::ImageData;

/// Which sliders the UI should show for the active filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SliderVisibility {
    pub intensity: bool,
    pub radius: bool,
}

impl SliderVisibility {
    /// Derive visibility from what the filter declares.
    ///
    /// The intensity slider drives both the intensity and the scale input.
    /// Under [`RadiusMapping::FromIntensity`] it drives radius as well and the
    /// radius slider is never shown.
    pub fn for_spec(spec: FilterSpec, mapping: RadiusMapping) -> Self {
        let declares_radius = spec.declares(ParameterKey::Radius);
        let intensity = spec.declares(ParameterKey::Intensity)
            || spec.declares(ParameterKey::Scale)
            || (mapping == RadiusMapping::FromIntensity && declares_radius);
        let radius = mapping == RadiusMapping::Direct && declares_radius;
        Self { intensity, radius }
    }
}

/// Current filter and slider values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub spec: FilterSpec,
    /// Intensity slider value (0-1)
    pub intensity: f32,
    /// Radius slider value (0-200)
    pub radius: f32,
    /// Derived from `spec`; refreshed on every reprocess
    pub sliders: SliderVisibility,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No source image.
    Empty,
    /// Source loaded, rendered with the filter that was active at load time.
    Loaded,
    /// Filter or parameters changed since the source was loaded.
    Edited,
}

/// Result of [`FilterSession::save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Handed to the sink; the callbacks will report the result.
    Submitted,
    /// No derived image; the sink was not called.
    NothingToSave,
}

/// Holds the filter session and keeps the derived image up to date.
#[derive(Debug)]
pub struct FilterSession<E = RasterEngine> {
    config: SessionConfig,
    engine: E,
    state: FilterState,
    source: Option<ImageData>,
    derived: Option<ImageData>,
    phase: SessionPhase,
}

impl FilterSession<RasterEngine> {
    pub fn new(config: SessionConfig) -> Self {
        Self::with_engine(config, RasterEngine::new())
    }
}

impl Default for FilterSession<RasterEngine> {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl<E: FilterEngine> FilterSession<E> {
    /// Create a session rendering through `engine`.
    pub fn with_engine(config: SessionConfig, engine: E) -> Self {
        let spec = FilterSpec::new(config.initial_filter);
        let state = FilterState {
            spec,
            intensity: clamp_to(INTENSITY_RANGE, config.default_intensity),
            radius: clamp_to(RADIUS_RANGE, config.default_radius),
            sliders: SliderVisibility::for_spec(spec, config.radius_mapping),
        };
        Self {
            config,
            engine,
            state,
            source: None,
            derived: None,
            phase: SessionPhase::Empty,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn spec(&self) -> FilterSpec {
        self.state.spec
    }

    pub fn intensity(&self) -> f32 {
        self.state.intensity
    }

    pub fn radius(&self) -> f32 {
        self.state.radius
    }

    pub fn sliders(&self) -> SliderVisibility {
        self.state.sliders
    }

    pub fn source(&self) -> Option<&ImageData> {
        self.source.as_ref()
    }

    /// The filtered image, or `None` when there is nothing to show.
    pub fn derived(&self) -> Option<&ImageData> {
        self.derived.as_ref()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Switch to another filter and reprocess.
    pub fn select_filter(&mut self, kind: FilterKind) {
        log::debug!("Selecting filter {kind}");
        self.state.spec = FilterSpec::new(kind);
        self.state.sliders = SliderVisibility::default();
        if self.config.switch_policy == SwitchPolicy::Reset {
            self.state.intensity = clamp_to(INTENSITY_RANGE, self.config.default_intensity);
            self.state.radius = clamp_to(RADIUS_RANGE, self.config.default_radius);
        }
        self.mark_edited();
        self.reprocess();
    }

    /// Set the intensity slider (clamped to 0-1) and reprocess.
    pub fn set_intensity(&mut self, value: f32) {
        self.state.intensity = clamp_to(INTENSITY_RANGE, value);
        self.mark_edited();
        self.reprocess();
    }

    /// Set the radius slider (clamped to 0-200) and reprocess.
    pub fn set_radius(&mut self, value: f32) {
        self.state.radius = clamp_to(RADIUS_RANGE, value);
        self.mark_edited();
        self.reprocess();
    }

    /// Replace the source image. `None` clears it along with the derived image.
    pub fn load_source(&mut self, image: Option<ImageData>) {
        match &image {
            Some(img) => log::info!("Loaded source image {}x{}", img.width, img.height),
            None => log::info!("Cleared source image"),
        }
        self.phase = if image.is_some() {
            SessionPhase::Loaded
        } else {
            SessionPhase::Empty
        };
        self.source = image;
        self.reprocess();
    }

    /// Ask `source` for an image and load it.
    ///
    /// A cancelled pick keeps the current source. Returns whether a new image
    /// was loaded.
    pub fn pick_from<S: ImageSource + ?Sized>(&mut self, source: &mut S) -> bool {
        match source.pick() {
            Some(image) => {
                self.load_source(Some(image));
                true
            }
            None => false,
        }
    }

    /// Engine inputs for the current state, restricted to the keys the active
    /// filter declares.
    pub fn inputs(&self) -> FilterInputs {
        let FilterState {
            spec,
            intensity,
            radius,
            ..
        } = self.state;
        let mut inputs = FilterInputs::new();
        for &key in spec.parameters() {
            let value = match key {
                ParameterKey::Intensity => intensity,
                ParameterKey::Scale => intensity * SCALE_FACTOR,
                ParameterKey::Radius => match self.config.radius_mapping {
                    RadiusMapping::Direct => radius,
                    RadiusMapping::FromIntensity => intensity * RADIUS_FROM_INTENSITY_FACTOR,
                },
            };
            inputs.set(key, value);
        }
        inputs
    }

    /// Hand the derived image to `sink`.
    ///
    /// Without a derived image this does nothing and the sink is not called;
    /// the callbacks are dropped unused.
    pub fn save<S: ImageSink + ?Sized>(&self, sink: &mut S, callbacks: SaveCallbacks) -> SaveOutcome {
        match &self.derived {
            Some(image) => {
                log::info!("Saving {} image", self.state.spec.kind());
                sink.persist(image.clone(), callbacks);
                SaveOutcome::Submitted
            }
            None => {
                log::debug!("Nothing to save");
                SaveOutcome::NothingToSave
            }
        }
    }

    fn mark_edited(&mut self) {
        if self.phase != SessionPhase::Empty {
            self.phase = SessionPhase::Edited;
        }
    }

    fn reprocess(&mut self) {
        self.state.sliders = SliderVisibility::for_spec(self.state.spec, self.config.radius_mapping);
        let inputs = self.inputs();
        self.derived = self
            .engine
            .render(self.state.spec.kind(), self.source.as_ref(), &inputs);
        log::debug!(
            "Reprocessed {} with {:?}: {}",
            self.state.spec.kind(),
            inputs,
            if self.derived.is_some() { "rendered" } else { "no output" }
        );
    }
}
