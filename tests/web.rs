//! Browser smoke test. Run with `wasm-pack test --headless --chrome`.
#![cfg(target_arch = "wasm32")]

use ripple_engine::RippleTank;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn tank_steps_and_exposes_buffers() {
    let mut tank = RippleTank::new(96, 64).unwrap();
    tank.apply_scenario("interference", None).unwrap();
    assert_eq!(tank.advance_frame(1.0, 60.0), 2);
    assert_eq!(tank.phase(), "running");

    let layout = tank.abi_layout();
    assert_eq!(layout.len_elements(), 96 * 64);
    assert_eq!(layout.f32_len_bytes(), 96 * 64 * 4);
    assert_ne!(layout.current_ptr(), layout.average_ptr());
}

#[wasm_bindgen_test]
fn bad_inputs_surface_as_js_errors() {
    assert!(RippleTank::new(0, 64).is_err());
    let mut tank = RippleTank::new(32, 32).unwrap();
    assert!(tank.apply_scenario("nope", None).is_err());
    assert!(tank.set_boundary_mode("sticky").is_err());
    assert!(tank
        .apply_scenario("diffraction", Some(r#"{"slitWidth": 10}"#.to_string()))
        .is_ok());
}
