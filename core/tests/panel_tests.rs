//! End-to-end tests for building, saving and restoring a panel.

use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;
use tweakpanel_core::{
    Bounds, ControllerType, Gui, GuiConfig, List, Options, PresetStore, Record, SavedState,
    Value, export_as_rust_grouped,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

const R: f64 = 122.0 / 255.0;
const G: f64 = 38.0 / 255.0;
const B: f64 = 171.0 / 255.0;

struct Scene {
    params: Record,
    array_color: List,
    object_color: Record,
}

/// Root: speed, label, visible, mode, tint (array), fire
/// Lighting: intensity, glow (object), hex
/// Lighting/Shadows: softness, enabled
fn build_scene(gui: &mut Gui) -> Result<Scene> {
    let array_color = List::new(vec![R.into(), G.into(), B.into()]);
    let object_color = Record::new().with("r", 122).with("g", 38).with("b", 171);
    let params = Record::new()
        .with("speed", 2.5)
        .with("label", "ship")
        .with("visible", true)
        .with("mode", "fast")
        .with("tint", array_color.clone())
        .with("fire", tweakpanel_core::Function::new(|_| {}))
        .with("intensity", 0.75)
        .with("glow", object_color.clone())
        .with("hex", 0x336699)
        .with("softness", 4.0)
        .with("enabled", false);

    gui.add(&params, "speed", Bounds::new(0.0, 10.0))?;
    gui.add(&params, "label", ())?;
    gui.add(&params, "visible", ())?;
    gui.add(&params, "mode", Options::list(["slow", "fast"]))?;
    gui.add_color(&params, "tint", 1.0)?;
    gui.add(&params, "fire", ())?;

    let mut lighting = gui.add_folder("Lighting");
    lighting.add(&params, "intensity", Bounds::new(0.0, 1.0).step(0.05))?;
    lighting.add_color(&params, "glow", 255.0)?;
    lighting.add_color(&params, "hex", 1.0)?;

    let mut shadows = lighting.add_folder("Shadows");
    shadows.add(&params, "softness", Bounds::at_least(0.0))?;
    shadows.add(&params, "enabled", ())?;

    Ok(Scene {
        params,
        array_color,
        object_color,
    })
}

fn snapshot(gui: &Gui) -> Vec<(String, Value)> {
    gui.controllers_recursive()
        .into_iter()
        .filter_map(|id| gui.get_controller(id))
        .map(|c| (c.name().to_string(), c.get_value()))
        .collect()
}

fn assert_same_values(before: &[(String, Value)], after: &[(String, Value)]) {
    assert_eq!(before.len(), after.len());
    for ((name, a), (_, b)) in before.iter().zip(after) {
        assert!(a.identical(b), "{}: {:?} != {:?}", name, a, b);
    }
}

#[test]
fn save_load_round_trip_restores_every_value() -> Result<()> {
    init_tracing();
    let mut gui = Gui::default();
    let scene = build_scene(&mut gui)?;

    let before = snapshot(&gui);
    let saved = gui.save()?;

    // Scribble over everything through the widgets
    for id in gui.controllers_recursive() {
        let ctrl = gui.controller(id).unwrap();
        match ctrl.controller_type() {
            Some(ControllerType::Number) => {
                ctrl.set_value(1.0);
            }
            Some(ControllerType::String) => {
                ctrl.input_text("changed");
            }
            Some(ControllerType::Boolean) => {
                let on = ctrl.get_value().as_bool().unwrap_or(false);
                ctrl.toggle(!on);
            }
            Some(ControllerType::Option) => {
                ctrl.select(0);
            }
            Some(ControllerType::Color) => {
                ctrl.pick_color("#010203");
            }
            Some(ControllerType::Function) | None => {}
        }
    }
    assert_eq!(scene.array_color.get(0).as_f64(), Some(1.0 / 255.0));
    assert_eq!(scene.object_color.get("b").as_f64(), Some(3.0));

    gui.load(&saved);
    assert_same_values(&before, &snapshot(&gui));

    // Non-primitive colors were restored in place
    let Value::Array(tint) = scene.params.get("tint") else {
        panic!("tint should still be an array");
    };
    assert!(tint.ptr_eq(&scene.array_color));
    assert_eq!(scene.array_color.get(1).as_f64(), Some(G));
    let Value::Object(glow) = scene.params.get("glow") else {
        panic!("glow should still be an object");
    };
    assert!(glow.ptr_eq(&scene.object_color));
    assert_eq!(scene.object_color.get("r").as_f64(), Some(122.0));
    Ok(())
}

#[test]
fn saved_state_survives_json() -> Result<()> {
    init_tracing();
    let mut gui = Gui::default();
    let scene = build_scene(&mut gui)?;
    let before = snapshot(&gui);

    let json = gui.save()?.to_json_string()?;
    let parsed: serde_json::Value = serde_json::from_str(&json)?;
    assert_eq!(parsed["controllers"]["tint"], "#7a26ab");
    assert_eq!(parsed["folders"]["Lighting"]["controllers"]["glow"], "#7a26ab");
    assert_eq!(parsed["folders"]["Lighting"]["controllers"]["hex"], "#336699");
    assert_eq!(
        parsed["folders"]["Lighting"]["folders"]["Shadows"]["controllers"]["softness"],
        4.0
    );
    assert!(parsed["controllers"].get("fire").is_none());

    scene.params.set("speed", 9.0);
    scene.params.set("label", "other");
    let restored = SavedState::from_json_str(&json)?;
    gui.load(&restored);
    assert_same_values(&before, &snapshot(&gui));
    Ok(())
}

#[test]
fn load_fires_each_finish_change_once() -> Result<()> {
    init_tracing();
    let mut gui = Gui::default();
    build_scene(&mut gui)?;
    let saved = gui.save()?;

    let commits = Rc::new(Cell::new(0));
    let seen = commits.clone();
    gui.root_mut()
        .on_finish_change(move |_| seen.set(seen.get() + 1));

    gui.load(&saved);
    // Everything but the function button
    assert_eq!(commits.get(), 10);
    Ok(())
}

#[test]
fn destroy_cascades_through_three_levels() -> Result<()> {
    init_tracing();
    let mut gui = Gui::default();
    build_scene(&mut gui)?;
    let folders = gui.folders_recursive();
    assert_eq!(folders.len(), 2);
    assert_eq!(gui.controller_count(), 11);

    // Listening controllers must not leave polls behind
    for id in gui.controllers_recursive() {
        gui.controller(id).unwrap().listen(true);
    }

    let removed = gui.destroy();
    assert_eq!(removed, 11 + 2);
    assert_eq!(gui.controller_count(), 0);
    assert!(gui.get_folder(gui.root()).unwrap().children().is_empty());
    for folder in folders {
        assert!(gui.get_folder(folder).is_none());
    }
    assert!(gui.controllers_recursive().is_empty());

    gui.frame(std::time::Instant::now());
    assert_eq!(gui.destroy(), 0);
    Ok(())
}

#[test]
fn presets_capture_and_apply() -> Result<()> {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("presets.json");

    let mut gui = Gui::new(GuiConfig::titled("Scene"));
    let scene = build_scene(&mut gui)?;
    let mut store = PresetStore::new();
    store.capture("calm", &gui)?;

    scene.params.set("speed", 8.0);
    store.capture("wild", &gui)?;
    store.save_to(&path)?;

    let mut store = PresetStore::load_from(&path)?;
    assert_eq!(store.names(), vec!["calm", "wild"]);
    assert!(store.apply("calm", &mut gui));
    assert_eq!(scene.params.get("speed").as_f64(), Some(2.5));
    assert_eq!(store.current(), "calm");
    assert!(!store.apply("missing", &mut gui));
    Ok(())
}

#[test]
fn export_lists_folders_as_modules() -> Result<()> {
    init_tracing();
    let mut gui = Gui::default();
    build_scene(&mut gui)?;

    let source = export_as_rust_grouped(&gui.save()?);
    assert!(source.contains("pub const SPEED: f64 = 2.5;"));
    assert!(source.contains("pub const TINT: &str = \"#7a26ab\";"));
    assert!(source.contains("pub mod lighting {"));
    assert!(source.contains("        pub const SOFTNESS: f64 = 4.0;"));
    Ok(())
}
