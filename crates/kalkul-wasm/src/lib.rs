use kalkul::json::TableauxStateJson;
use kalkul::{Calculus, KernelError, PropositionalTableaux, TableauxParams};
use wasm_bindgen::prelude::*;

/// Browser entry point for the propositional tableaux calculus.
///
/// Like the server protocol it is stateless: every call takes the encoded
/// state and returns a new one.
#[wasm_bindgen]
pub struct KalkulWasm {
    calculus: PropositionalTableaux,
}

fn js_error(e: KernelError) -> JsError {
    JsError::new(&e.to_string())
}

#[wasm_bindgen]
impl KalkulWasm {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        KalkulWasm {
            calculus: PropositionalTableaux::default(),
        }
    }

    /// Parse a clause set or formula into an encoded initial state.
    /// `params` is an optional object such as `{regular: true}`.
    #[wasm_bindgen]
    pub fn parse(&self, formula: &str, params: JsValue) -> Result<String, JsError> {
        let params: TableauxParams = if params.is_undefined() || params.is_null() {
            TableauxParams::default()
        } else {
            serde_wasm_bindgen::from_value(params)
                .map_err(|e| JsError::new(&format!("Invalid tableaux parameters: {}", e)))?
        };
        let state = self
            .calculus
            .parse_formula(formula, params)
            .map_err(js_error)?;
        Ok(self.calculus.encode_state(&state))
    }

    /// Apply a JSON move such as `{"type":"e","id1":0,"id2":1}`
    #[wasm_bindgen(js_name = applyMove)]
    pub fn apply_move(&self, state: &str, mv: &str) -> Result<String, JsError> {
        self.calculus.apply_move_str(state, mv).map_err(js_error)
    }

    /// Returns `{closed, msg}`
    #[wasm_bindgen(js_name = checkClose)]
    pub fn check_close(&self, state: &str) -> Result<JsValue, JsError> {
        let result = self.calculus.check_close_str(state).map_err(js_error)?;
        serde_wasm_bindgen::to_value(&result).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Decoded state for drawing the tree
    #[wasm_bindgen(js_name = stateView)]
    pub fn state_view(&self, state: &str) -> Result<JsValue, JsError> {
        let state = self.calculus.decode_state(state).map_err(js_error)?;
        serde_wasm_bindgen::to_value(&TableauxStateJson::from_state(&state))
            .map_err(|e| JsError::new(&e.to_string()))
    }
}

impl Default for KalkulWasm {
    fn default() -> Self {
        Self::new()
    }
}
