use js_sys::{Function, JSON};
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use motionkit_blend_core::{
    parse_blend_tree_json, resolve_with, BlendTree, Motion, Query, ResolverConfig,
};
use motionkit_events_core::{parse_state_events_json, StateEvents, StateTrigger, TriggerPhase};

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn stringify(value: &JsValue, what: &str) -> Result<String, JsError> {
    JSON::stringify(value)
        .map_err(|e| JsError::new(&format!("{what} stringify error: {:?}", e)))?
        .as_string()
        .ok_or_else(|| JsError::new(&format!("{what}: stringify produced non-string")))
}

fn phase_name(phase: TriggerPhase) -> String {
    match phase {
        TriggerPhase::Idle => "idle",
        TriggerPhase::Armed => "armed",
        TriggerPhase::Fired => "fired",
    }
    .to_string()
}

fn parse_tree(tree_json: &JsValue) -> Result<BlendTree<Motion<String>>, JsError> {
    if jsvalue_is_undefined_or_null(tree_json) {
        return Err(JsError::new("resolve_weights: tree is null/undefined"));
    }
    let s = stringify(tree_json, "resolve_weights tree")?;
    parse_blend_tree_json(&s).map_err(|e| JsError::new(&format!("resolve_weights: {e}")))
}

/// Resolve normalized child weights for a stored blend tree (editor export
/// format) and a query `{ kind: "one_dimensional", normalized_time }` or
/// `{ kind: "two_dimensional", x, y }`. `cfg` is an optional ResolverConfig.
/// Returns `{ weights: number[] }`.
#[wasm_bindgen(js_name = resolve_weights)]
pub fn resolve_weights(tree: JsValue, query: JsValue, cfg: JsValue) -> Result<JsValue, JsError> {
    console_error_panic_hook::set_once();

    let tree = parse_tree(&tree)?;
    let query: Query =
        swb::from_value(query).map_err(|e| JsError::new(&format!("query error: {e}")))?;
    let cfg: ResolverConfig = if jsvalue_is_undefined_or_null(&cfg) {
        ResolverConfig::default()
    } else {
        swb::from_value(cfg).map_err(|e| JsError::new(&format!("config error: {e}")))?
    };

    let result = resolve_with(&cfg, &tree, &query)
        .map_err(|e| JsError::new(&format!("resolve_weights: {e}")))?;
    swb::to_value(&result).map_err(|e| JsError::new(&format!("weights error: {e}")))
}

/// First clip name reachable in a stored blend tree, for picking a preview clip.
#[wasm_bindgen(js_name = first_clip)]
pub fn first_clip(tree: JsValue) -> Result<Option<String>, JsError> {
    let tree = parse_tree(&tree)?;
    Ok(tree
        .children
        .iter()
        .find_map(|c| c.motion.first_clip())
        .cloned())
}

/// Single one-shot trigger driven by the host: `enter()`, `tick(progress)`, `exit()`.
#[wasm_bindgen]
pub struct MotionkitTrigger {
    core: StateTrigger,
}

#[wasm_bindgen]
impl MotionkitTrigger {
    #[wasm_bindgen(constructor)]
    pub fn new(event_name: String, trigger_time: f32) -> Result<MotionkitTrigger, JsError> {
        console_error_panic_hook::set_once();
        let core = StateTrigger::try_new(event_name, trigger_time)
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(MotionkitTrigger { core })
    }

    pub fn enter(&mut self) {
        self.core.enter();
    }

    pub fn exit(&mut self) {
        self.core.exit();
    }

    /// Returns the event name on the tick that fires, otherwise undefined.
    pub fn tick(&mut self, progress: f32) -> Option<String> {
        self.core.tick(progress).map(str::to_string)
    }

    pub fn phase(&self) -> String {
        phase_name(self.core.phase())
    }

    #[wasm_bindgen(getter, js_name = triggerTime)]
    pub fn trigger_time(&self) -> f32 {
        self.core.trigger_time()
    }
}

/// All triggers of one state, dispatching fired names to a JS callback
/// `(eventName: string) => void`.
#[wasm_bindgen]
pub struct MotionkitStateEvents {
    core: StateEvents,
    callback: Option<Function>,
}

#[wasm_bindgen]
impl MotionkitStateEvents {
    /// `configs` is an array of `{ event_name, trigger_time }`.
    #[wasm_bindgen(constructor)]
    pub fn new(configs: JsValue) -> Result<MotionkitStateEvents, JsError> {
        console_error_panic_hook::set_once();
        let core = if jsvalue_is_undefined_or_null(&configs) {
            StateEvents::default()
        } else {
            let s = stringify(&configs, "state events")?;
            parse_state_events_json(&s).map_err(|e| JsError::new(&e.to_string()))?
        };
        Ok(MotionkitStateEvents {
            core,
            callback: None,
        })
    }

    #[wasm_bindgen(js_name = set_callback)]
    pub fn set_callback(&mut self, callback: Function) {
        self.callback = Some(callback);
    }

    pub fn enter(&mut self) {
        self.core.enter();
    }

    pub fn exit(&mut self) {
        self.core.exit();
    }

    /// Tick every trigger; fired names are passed to the callback and returned.
    pub fn tick(&mut self, progress: f32) -> Result<Vec<String>, JsError> {
        let fired = self.core.poll(progress);
        if let Some(cb) = &self.callback {
            for name in &fired {
                cb.call1(&JsValue::UNDEFINED, &JsValue::from_str(name))
                    .map_err(|e| JsError::new(&format!("event callback error: {:?}", e)))?;
            }
        }
        Ok(fired)
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
