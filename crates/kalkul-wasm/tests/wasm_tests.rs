// These are wasm_bindgen_test functions, only runnable via `wasm-pack test`.
// cargo test sees them as dead code since they lack #[test].
#![allow(dead_code)]

use kalkul::CloseMsg;
use kalkul_wasm::KalkulWasm;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn params(json: &str) -> JsValue {
    js_sys::JSON::parse(json).expect("invalid JSON for params")
}

fn close_msg(value: JsValue) -> CloseMsg {
    serde_wasm_bindgen::from_value(value).expect("close result has the wrong shape")
}

// ---------------------------------------------------------------------------
// parse
// ---------------------------------------------------------------------------

#[wasm_bindgen_test]
fn parse_clause_set_defaults() {
    let kalkul = KalkulWasm::new();
    let state = kalkul.parse("a,b;!a", JsValue::UNDEFINED).unwrap();
    assert_eq!(
        state,
        "tableauxstate|{a, b}, {!a}|[true;p;-;-;l;o;()]|unconnected;irregular;backtracking|[]"
    );
}

#[wasm_bindgen_test]
fn parse_with_params() {
    let kalkul = KalkulWasm::new();
    let state = kalkul
        .parse("a;!a", params(r#"{"connectedness": "strong", "backtracking": false}"#))
        .unwrap();
    assert!(state.ends_with("|strong;irregular;nobacktracking|[]"), "{}", state);
}

#[wasm_bindgen_test]
fn parse_infix_formula() {
    let kalkul = KalkulWasm::new();
    let state = kalkul.parse("a & !a", JsValue::NULL).unwrap();
    assert!(state.starts_with("tableauxstate|{a}, {!a}|"), "{}", state);
}

#[wasm_bindgen_test]
fn parse_rejects_invalid_input() {
    let kalkul = KalkulWasm::new();
    assert!(kalkul.parse("a;;b", JsValue::UNDEFINED).is_err());
    assert!(kalkul.parse("", JsValue::UNDEFINED).is_err());
    assert!(kalkul.parse("a", params(r#"{"regular": 3}"#)).is_err());
}

// ---------------------------------------------------------------------------
// applyMove / checkClose
// ---------------------------------------------------------------------------

#[wasm_bindgen_test]
fn prove_contradiction() {
    let kalkul = KalkulWasm::new();
    let state = kalkul.parse("a;!a", JsValue::UNDEFINED).unwrap();
    assert!(!close_msg(kalkul.check_close(&state).unwrap()).closed);

    let state = kalkul.apply_move(&state, r#"{"type":"e","id1":0,"id2":0}"#).unwrap();
    let state = kalkul.apply_move(&state, r#"{"type":"e","id1":1,"id2":1}"#).unwrap();
    let state = kalkul.apply_move(&state, r#"{"type":"c","id1":2,"id2":1}"#).unwrap();

    let result = close_msg(kalkul.check_close(&state).unwrap());
    assert!(result.closed, "{}", result.msg);
}

#[wasm_bindgen_test]
fn illegal_move_is_an_error() {
    let kalkul = KalkulWasm::new();
    let state = kalkul.parse("a,b;c", JsValue::UNDEFINED).unwrap();
    assert!(kalkul.apply_move(&state, r#"{"type":"e","id1":4,"id2":0}"#).is_err());
    assert!(kalkul.apply_move(&state, r#"{"type":"x"}"#).is_err());
    assert!(kalkul.apply_move("tableauxstate|garbage", r#"{"type":"b"}"#).is_err());
}

#[wasm_bindgen_test]
fn state_view_lists_nodes() {
    let kalkul = KalkulWasm::new();
    let state = kalkul.parse("a,b;c", JsValue::UNDEFINED).unwrap();
    let state = kalkul.apply_move(&state, r#"{"type":"e","id1":0,"id2":0}"#).unwrap();

    let view: serde_json::Value =
        serde_wasm_bindgen::from_value(kalkul.state_view(&state).unwrap()).unwrap();
    assert_eq!(view["nodes"].as_array().map(Vec::len), Some(3));
    assert_eq!(view["state"], state.as_str());
}
