//! Tests for the GUI tree and controller behavior

#![cfg(test)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use super::{AddArgs, Child, Gui};
use crate::config::GuiConfig;
use crate::controller::{Bounds, ControllerType, Options};
use crate::error::GuiError;
use crate::input::{Key, Modifiers, Point, Rect, WheelInput};
use crate::value::{Function, List, Record, Value};

fn log() -> Rc<RefCell<Vec<String>>> {
    Rc::new(RefCell::new(Vec::new()))
}

fn counter() -> Rc<Cell<u32>> {
    Rc::new(Cell::new(0))
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn test_layout_hints_are_kept_for_the_renderer() {
    let gui = Gui::new(GuiConfig {
        width: 320.0,
        touch_styles: false,
        ..GuiConfig::titled("Scene")
    });
    assert_eq!(gui.config().width, 320.0);
    assert!(!gui.config().touch_styles);
    assert_eq!(gui.get_folder(gui.root()).unwrap().title(), "Scene");
}

#[test]
fn test_add_infers_controller_type() {
    let object = Record::new()
        .with("flag", true)
        .with("label", "ship")
        .with("speed", 1.5)
        .with("fire", Function::new(|_| {}));
    let mut gui = Gui::default();

    let cases = [
        ("flag", ControllerType::Boolean),
        ("label", ControllerType::String),
        ("speed", ControllerType::Number),
        ("fire", ControllerType::Function),
    ];
    for (property, expected) in cases {
        let ctrl = gui.add(&object, property, ()).unwrap();
        assert_eq!(ctrl.controller_type(), Some(expected), "{}", property);
    }
}

#[test]
fn test_options_argument_wins_over_value_type() {
    let object = Record::new()
        .with("flag", true)
        .with("speed", 1.0)
        .with("mode", "a");
    let mut gui = Gui::default();

    let list = gui.add(&object, "flag", vec![true, false]).unwrap();
    assert_eq!(list.controller_type(), Some(ControllerType::Option));

    let map = Record::new().with("Slow", 1.0).with("Fast", 5.0);
    let by_map = gui.add(&object, "speed", map).unwrap();
    assert_eq!(by_map.controller_type(), Some(ControllerType::Option));

    let by_list = gui
        .add(&object, "mode", List::new(vec!["a".into(), "b".into()]))
        .unwrap();
    assert_eq!(by_list.controller_type(), Some(ControllerType::Option));
}

#[test]
fn test_add_undefined_property_fails() {
    let object = Record::new();
    let mut gui = Gui::default();
    let err = gui.add(&object, "missing", ()).unwrap_err();
    assert!(matches!(err, GuiError::UndefinedProperty { ref property } if property == "missing"));
    assert_eq!(gui.controller_count(), 0);
}

#[test]
fn test_add_undefined_property_with_options_fails() {
    let object = Record::new();
    let mut gui = Gui::default();
    let err = gui.add(&object, "missing", vec![1.0, 2.0]).unwrap_err();
    assert!(matches!(err, GuiError::UndefinedProperty { .. }));

    let err = gui
        .add(&object, "missing", Options::map([("Low", 0), ("High", 1)]))
        .unwrap_err();
    assert!(matches!(err, GuiError::UndefinedProperty { .. }));
    assert_eq!(gui.controller_count(), 0);
    assert!(gui.get_folder(gui.root()).unwrap().children().is_empty());
}

#[test]
fn test_add_unsupported_type_fails() {
    let object = Record::new().with("items", List::new(vec![1.into()]));
    let mut gui = Gui::default();
    let err = gui.add(&object, "items", AddArgs::None).unwrap_err();
    assert!(matches!(
        err,
        GuiError::UnsupportedType {
            type_name: "array",
            ..
        }
    ));
}

#[test]
fn test_add_color_rejects_non_colors() {
    let object = Record::new().with("flag", true).with("tint", "teal");
    let mut gui = Gui::default();
    assert!(matches!(
        gui.add_color(&object, "flag", 1.0).unwrap_err(),
        GuiError::UnsupportedType { .. }
    ));
    assert!(matches!(
        gui.add_color(&object, "tint", 1.0).unwrap_err(),
        GuiError::InvalidColor { .. }
    ));
}

#[test]
fn test_default_title_and_close_folders() {
    let gui = Gui::default();
    assert_eq!(gui.get_folder(gui.root()).unwrap().title(), "Controls");

    let mut gui = Gui::new(GuiConfig {
        close_folders: true,
        ..GuiConfig::titled("Scene")
    });
    assert_eq!(gui.get_folder(gui.root()).unwrap().title(), "Scene");
    let folder = gui.add_folder("Lights");
    assert!(folder.is_closed());
}

// =============================================================================
// Value flow and callbacks
// =============================================================================

#[test]
fn test_set_value_writes_and_notifies() {
    let object = Record::new().with("speed", 1.0);
    let changes = counter();
    let mut gui = Gui::default();

    let seen = changes.clone();
    let ctrl = gui
        .add(&object, "speed", ())
        .unwrap()
        .on_change(move |_| seen.set(seen.get() + 1))
        .set_value(2.0);
    assert_eq!(ctrl.get_value().as_f64(), Some(2.0));
    assert_eq!(object.get("speed").as_f64(), Some(2.0));

    // Identical value: no notification
    ctrl.set_value(2.0);
    assert_eq!(changes.get(), 1);
}

#[test]
fn test_change_events_bubble_root_first() {
    let object = Record::new().with("x", 0.0);
    let order = log();
    let mut gui = Gui::default();

    let o = order.clone();
    gui.root_mut().on_change(move |_| o.borrow_mut().push("root".into()));

    let o = order.clone();
    let mut folder = gui
        .add_folder("Outer")
        .on_change(move |_| o.borrow_mut().push("folder".into()));

    let o = order.clone();
    folder
        .add(&object, "x", ())
        .unwrap()
        .on_change(move |e| o.borrow_mut().push(format!("ctrl {}", e.property)))
        .set_value(1.0);

    assert_eq!(*order.borrow(), vec!["root", "folder", "ctrl x"]);
}

#[test]
fn test_finish_change_fires_only_after_change() {
    let object = Record::new().with("label", "a");
    let finishes = counter();
    let mut gui = Gui::default();

    let seen = finishes.clone();
    let ctrl = gui
        .add(&object, "label", ())
        .unwrap()
        .on_finish_change(move |e| {
            assert_eq!(e.value.as_str(), Some("abc"));
            seen.set(seen.get() + 1)
        })
        .focus()
        .input_text("ab")
        .input_text("abc")
        .blur();
    assert_eq!(finishes.get(), 1);

    // Nothing changed since the last commit
    ctrl.focus().blur();
    assert_eq!(finishes.get(), 1);
}

#[test]
fn test_blur_without_focus_does_not_commit() {
    let object = Record::new().with("label", "a");
    let finishes = counter();
    let mut gui = Gui::default();

    let seen = finishes.clone();
    let ctrl = gui
        .add(&object, "label", ())
        .unwrap()
        .on_finish_change(move |_| seen.set(seen.get() + 1))
        .input_text("typed")
        .blur()
        .key_down(Key::Enter, Modifiers::NONE);
    assert_eq!(object.get("label").as_str(), Some("typed"));
    assert_eq!(finishes.get(), 0);

    // The pending change is committed on the next real blur
    ctrl.focus().blur();
    assert_eq!(finishes.get(), 1);
}

#[test]
fn test_reset_is_idempotent() {
    let object = Record::new().with("speed", 1.0);
    let finishes = counter();
    let mut gui = Gui::default();

    let seen = finishes.clone();
    let ctrl = gui
        .add(&object, "speed", ())
        .unwrap()
        .on_finish_change(move |_| seen.set(seen.get() + 1))
        .set_value(4.0)
        .reset();
    assert_eq!(ctrl.get_value().as_f64(), Some(1.0));
    assert_eq!(finishes.get(), 1);

    ctrl.reset().reset();
    assert_eq!(finishes.get(), 1);
}

#[test]
fn test_load_always_commits_once() {
    let object = Record::new().with("on", false);
    let finishes = counter();
    let mut gui = Gui::default();

    let seen = finishes.clone();
    let ctrl = gui
        .add(&object, "on", ())
        .unwrap()
        .on_finish_change(move |_| seen.set(seen.get() + 1))
        .load(false);
    assert_eq!(finishes.get(), 1);
    ctrl.load(true);
    assert_eq!(finishes.get(), 2);
    assert_eq!(object.get("on").as_bool(), Some(true));
}

#[test]
fn test_disabled_controller_rejects_input() {
    let object = Record::new().with("on", false);
    let mut gui = Gui::default();

    let ctrl = gui.add(&object, "on", ()).unwrap().disable(true).toggle(true);
    assert_eq!(object.get("on").as_bool(), Some(false));
    assert!(ctrl.display().unwrap().disabled);

    let ctrl = ctrl.enable(true).toggle(true);
    assert_eq!(object.get("on").as_bool(), Some(true));
    assert!(ctrl.display().unwrap().checked);
}

#[test]
fn test_function_press_calls_with_object() {
    let calls = counter();
    let seen = calls.clone();
    let object = Record::new().with("count", 0.0);
    object.set(
        "bump",
        Function::new(move |this| {
            seen.set(seen.get() + 1);
            let n = this.get("count").as_f64().unwrap_or(0.0);
            this.set("count", n + 1.0);
        }),
    );
    let root_changes = counter();
    let mut gui = Gui::default();

    let seen = root_changes.clone();
    gui.root_mut().on_change(move |_| seen.set(seen.get() + 1));
    gui.add(&object, "bump", ()).unwrap().press().press();

    assert_eq!(calls.get(), 2);
    assert_eq!(object.get("count").as_f64(), Some(2.0));
    assert_eq!(root_changes.get(), 2);
}

#[test]
fn test_option_select_and_display_fallback() {
    let object = Record::new().with("speed", 1.0);
    let mut gui = Gui::default();

    let ctrl = gui
        .add(&object, "speed", Options::map([("Slow", 0.5), ("Normal", 1.0)]))
        .unwrap();
    assert_eq!(ctrl.display().unwrap().selected, Some(1));
    assert_eq!(ctrl.display().unwrap().text, "Normal");

    let ctrl = ctrl.select(0);
    assert_eq!(object.get("speed").as_f64(), Some(0.5));

    object.set("speed", 7.0);
    let ctrl = ctrl.update_display();
    assert_eq!(ctrl.display().unwrap().selected, None);
    assert_eq!(ctrl.display().unwrap().text, "7");
}

#[test]
fn test_options_replaces_in_place() {
    let object = Record::new().with("a", 1.0).with("b", 2.0);
    let mut gui = Gui::default();

    let old = gui.add(&object, "a", ()).unwrap().name("Alpha").id();
    let b = gui.add(&object, "b", ()).unwrap().id();

    let new = gui
        .controller(old)
        .unwrap()
        .options(vec![1.0, 2.0, 3.0])
        .unwrap();
    let new_id = new.id();
    assert_eq!(new.controller_type(), Some(ControllerType::Option));
    assert_eq!(new.get().unwrap().name(), "Alpha");

    assert!(gui.get_controller(old).is_none());
    let root = gui.get_folder(gui.root()).unwrap();
    assert_eq!(
        root.children(),
        [Child::Controller(new_id), Child::Controller(b)]
    );
}

// =============================================================================
// Number controller
// =============================================================================

#[test]
fn test_increment_steps_into_range() {
    let object = Record::new().with("n", 0.0);
    let mut gui = Gui::default();
    let id = gui
        .add(&object, "n", Bounds::new(1.0, 10.0).step(1.0))
        .unwrap()
        .id();

    let mut seen = Vec::new();
    for _ in 0..5 {
        gui.controller(id)
            .unwrap()
            .key_down(Key::ArrowUp, Modifiers::NONE);
        seen.push(object.get("n").as_f64().unwrap());
    }
    assert_eq!(seen, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
}

#[test]
fn test_decimals_only_affect_display() {
    let object = Record::new().with("x", 3.1007);
    let mut gui = Gui::default();

    let ctrl = gui.add(&object, "x", ()).unwrap().decimals(1);
    assert_eq!(ctrl.display().unwrap().text, "3.1");
    let ctrl = ctrl.decimals(5);
    assert_eq!(ctrl.display().unwrap().text, "3.10070");
    assert_eq!(object.get("x").as_f64(), Some(3.1007));

    // Focused fields show what the user is typing
    let ctrl = ctrl.focus().input_text("3.");
    assert_eq!(ctrl.display().unwrap().text, "3.");
    let ctrl = ctrl.blur();
    assert_eq!(ctrl.display().unwrap().text, "3.00000");
}

#[test]
fn test_number_text_input() {
    let object = Record::new().with("x", 0.0).with("y", 0.0);
    let mut gui = Gui::default();

    // Implicit step: typed values are not snapped
    let x = gui.add(&object, "x", Bounds::new(0.0, 10.0)).unwrap();
    let x = x.input_text("3.14159");
    assert_eq!(object.get("x").as_f64(), Some(3.14159));
    let x = x.input_text("oops");
    assert_eq!(object.get("x").as_f64(), Some(3.14159));
    x.input_text("50");
    assert_eq!(object.get("x").as_f64(), Some(10.0));

    // Explicit step: snapped, then clamped
    gui.add(&object, "y", Bounds::new(0.0, 10.0).step(0.5))
        .unwrap()
        .input_text("3.3");
    assert_eq!(object.get("y").as_f64(), Some(3.5));
}

#[test]
fn test_wheel_needs_focus() {
    let object = Record::new().with("x", 1.0);
    let mut gui = Gui::default();
    let id = gui
        .add(&object, "x", Bounds::default().step(1.0))
        .unwrap()
        .id();

    assert!(!gui.controller(id).unwrap().wheel(WheelInput::new(0.0, -1.0)));
    assert_eq!(object.get("x").as_f64(), Some(1.0));

    let ctrl = gui.controller(id).unwrap().focus();
    assert!(ctrl.wheel(WheelInput::new(0.0, -1.0)));
    assert_eq!(object.get("x").as_f64(), Some(2.0));
}

#[test]
fn test_pixel_wheel_notch_moves_one_step() {
    let object = Record::new().with("x", 1.0);
    let mut gui = Gui::default();
    let id = gui
        .add(&object, "x", Bounds::default().step(1.0))
        .unwrap()
        .focus()
        .id();

    assert!(gui.controller(id).unwrap().wheel(WheelInput::pixels(0.0, -100.0)));
    assert_eq!(object.get("x").as_f64(), Some(2.0));

    // Trackpad deltas add up across events
    for _ in 0..4 {
        gui.controller(id).unwrap().wheel(WheelInput::pixels(0.0, 25.0));
    }
    assert_eq!(object.get("x").as_f64(), Some(1.0));
}

#[test]
fn test_slider_drag() {
    let object = Record::new().with("x", 0.0);
    let finishes = counter();
    let rect = Rect::new(100.0, 300.0, 0.0, 20.0);
    let mut gui = Gui::default();

    let seen = finishes.clone();
    let ctrl = gui
        .add(&object, "x", Bounds::new(0.0, 100.0))
        .unwrap()
        .on_finish_change(move |_| seen.set(seen.get() + 1))
        .slider_pointer_down(150.0, rect);
    assert_eq!(object.get("x").as_f64(), Some(25.0));
    assert!(ctrl.display().unwrap().dragging);

    let ctrl = ctrl.slider_pointer_move(250.0, rect);
    assert_eq!(object.get("x").as_f64(), Some(75.0));
    let ctrl = ctrl.slider_pointer_move(900.0, rect);
    assert_eq!(object.get("x").as_f64(), Some(100.0));
    assert_eq!(finishes.get(), 0);

    let ctrl = ctrl.slider_pointer_up();
    assert_eq!(finishes.get(), 1);
    assert!(!ctrl.display().unwrap().dragging);
    assert_eq!(ctrl.display().unwrap().fill, 1.0);
}

#[test]
fn test_slider_touch_releases_to_scroll() {
    let object = Record::new().with("x", 50.0);
    let rect = Rect::new(0.0, 100.0, 0.0, 20.0);
    let mut gui = Gui::new(GuiConfig {
        scrollable: true,
        ..GuiConfig::default()
    });
    let id = gui.add(&object, "x", Bounds::new(0.0, 100.0)).unwrap().id();

    // Mostly vertical first move: the page scrolls
    let ctrl = gui
        .controller(id)
        .unwrap()
        .slider_touch_start(1, Point::new(10.0, 10.0), rect);
    assert!(!ctrl.slider_touch_move(Point::new(12.0, 40.0), rect));
    assert_eq!(object.get("x").as_f64(), Some(50.0));

    // Mostly horizontal first move: the slider drags
    let ctrl = gui
        .controller(id)
        .unwrap()
        .slider_touch_start(1, Point::new(10.0, 10.0), rect);
    assert!(ctrl.slider_touch_move(Point::new(30.0, 12.0), rect));
    assert_eq!(object.get("x").as_f64(), Some(30.0));
}

#[test]
fn test_slider_wheel_debounces_finish_change() {
    let object = Record::new().with("x", 5.0);
    let finishes = counter();
    let start = Instant::now();
    let mut gui = Gui::default();

    let seen = finishes.clone();
    let id = gui
        .add(&object, "x", Bounds::new(0.0, 10.0).step(1.0))
        .unwrap()
        .on_finish_change(move |_| seen.set(seen.get() + 1))
        .id();

    assert!(gui
        .controller(id)
        .unwrap()
        .slider_wheel(WheelInput::new(0.0, -1.0), start));
    assert_eq!(object.get("x").as_f64(), Some(6.0));

    gui.frame(start + Duration::from_millis(100));
    assert_eq!(finishes.get(), 0);
    gui.frame(start + Duration::from_millis(500));
    assert_eq!(finishes.get(), 1);
    gui.frame(start + Duration::from_millis(900));
    assert_eq!(finishes.get(), 1);
}

#[test]
fn test_vertical_text_drag() {
    let object = Record::new().with("x", 10.0);
    let finishes = counter();
    let mut gui = Gui::default();

    let seen = finishes.clone();
    let ctrl = gui
        .add(&object, "x", Bounds::default().step(1.0))
        .unwrap()
        .on_finish_change(move |_| seen.set(seen.get() + 1))
        .text_pointer_down(Point::new(0.0, 100.0))
        .text_pointer_move(Point::new(0.0, 103.0), Modifiers::NONE);
    assert_eq!(object.get("x").as_f64(), Some(10.0));

    // Past the threshold: 13px up from the last position
    let ctrl = ctrl.text_pointer_move(Point::new(0.0, 90.0), Modifiers::NONE);
    assert_eq!(object.get("x").as_f64(), Some(23.0));

    ctrl.text_pointer_up();
    assert_eq!(finishes.get(), 1);
}

// =============================================================================
// Color controller
// =============================================================================

#[test]
fn test_color_display_in_every_format() {
    let r = 122.0 / 255.0;
    let g = 38.0 / 255.0;
    let b = 171.0 / 255.0;
    let object = Record::new()
        .with("string", "#7a26ab")
        .with("int", 0x7a26ab)
        .with("array", List::new(vec![r.into(), g.into(), b.into()]))
        .with("object", Record::new().with("r", r).with("g", g).with("b", b));
    let mut gui = Gui::default();

    for property in ["string", "int", "array", "object"] {
        let ctrl = gui.add_color(&object, property, 1.0).unwrap();
        let display = ctrl.display().unwrap();
        assert_eq!(display.swatch.as_deref(), Some("#7a26ab"), "{}", property);
        assert_eq!(display.text, "7a26ab", "{}", property);
    }
}

#[test]
fn test_color_edit_and_reset_preserve_reference() {
    let list = List::new(vec![0.0.into(), 0.0.into(), 1.0.into()]);
    let object = Record::new().with("tint", list.clone());
    let changes = counter();
    let finishes = counter();
    let mut gui = Gui::default();

    let (c, f) = (changes.clone(), finishes.clone());
    let ctrl = gui
        .add_color(&object, "tint", 1.0)
        .unwrap()
        .on_change(move |_| c.set(c.get() + 1))
        .on_finish_change(move |_| f.set(f.get() + 1))
        .pick_color("#ff0000");
    assert_eq!(list.get(0).as_f64(), Some(1.0));
    assert_eq!(list.get(2).as_f64(), Some(0.0));
    assert_eq!(changes.get(), 1);

    let ctrl = ctrl.reset();
    let Value::Array(bound) = ctrl.get_value() else {
        panic!("expected array");
    };
    assert!(bound.ptr_eq(&list));
    assert_eq!(list.get(2).as_f64(), Some(1.0));
    assert_eq!(finishes.get(), 1);

    ctrl.reset();
    assert_eq!(finishes.get(), 1);
}

#[test]
fn test_string_color_keeps_its_text_across_save_load_and_reset() {
    let object = Record::new()
        .with("rgb", "rgb(122, 38, 171)")
        .with("short", "#7ab");
    let changes = counter();
    let mut gui = Gui::default();

    let c = changes.clone();
    gui.root_mut().on_change(move |_| c.set(c.get() + 1));
    let rgb = gui.add_color(&object, "rgb", 1.0).unwrap().id();
    let short = gui.add_color(&object, "short", 1.0).unwrap().id();

    let saved = gui.save().unwrap();
    gui.load(&saved);
    assert_eq!(object.get("rgb").as_str(), Some("rgb(122, 38, 171)"));
    assert_eq!(object.get("short").as_str(), Some("#7ab"));
    assert_eq!(changes.get(), 0);

    gui.controller(rgb).unwrap().reset();
    assert_eq!(object.get("rgb").as_str(), Some("rgb(122, 38, 171)"));

    gui.controller(short).unwrap().pick_color("#000000").reset();
    assert_eq!(object.get("short").as_str(), Some("#7ab"));
}

#[test]
fn test_color_text_input_ignores_garbage() {
    let object = Record::new().with("tint", "#000000");
    let mut gui = Gui::default();

    let ctrl = gui
        .add_color(&object, "tint", 1.0)
        .unwrap()
        .focus()
        .input_text("not a color");
    assert_eq!(object.get("tint").as_str(), Some("#000000"));

    let ctrl = ctrl.input_text("f0c").key_down(Key::Enter, Modifiers::NONE);
    assert_eq!(object.get("tint").as_str(), Some("#ff00cc"));
    assert_eq!(ctrl.display().unwrap().text, "ff00cc");
    assert_eq!(ctrl.save().as_str(), Some("#ff00cc"));
}

// =============================================================================
// Listen
// =============================================================================

#[test]
fn test_listen_refreshes_only_on_change() {
    let object = Record::new().with("x", 1.0);
    let now = Instant::now();
    let mut gui = Gui::default();
    let id = gui.add(&object, "x", ()).unwrap().listen(true).id();
    let revision = |gui: &Gui| gui.get_controller(id).unwrap().display().revision;

    let start = revision(&gui);
    for _ in 0..3 {
        gui.frame(now);
    }
    assert_eq!(revision(&gui), start);

    object.set("x", 2.0);
    gui.frame(now);
    gui.frame(now);
    assert_eq!(revision(&gui), start + 1);
    assert_eq!(gui.get_controller(id).unwrap().display().text, "2");
}

#[test]
fn test_listen_off_cancels_poll() {
    let object = Record::new().with("x", 1.0);
    let mut gui = Gui::default();
    let id = gui.add(&object, "x", ()).unwrap().listen(true).id();
    assert_eq!(gui.scheduler.len(), 1);

    // Re-listening replaces the handle rather than stacking a second one
    gui.controller(id).unwrap().listen(true);
    assert_eq!(gui.scheduler.len(), 1);

    gui.controller(id).unwrap().listen(false);
    assert!(gui.scheduler.is_empty());
    gui.frame(Instant::now());
    assert!(gui.scheduler.is_empty());
}

// =============================================================================
// Tree
// =============================================================================

#[test]
fn test_recursive_enumeration_order() {
    let object = Record::new().with("a", 1.0).with("b", 2.0).with("c", 3.0);
    let mut gui = Gui::default();

    let a = gui.add(&object, "a", ()).unwrap().id();
    let mut outer = gui.add_folder("Outer");
    let outer_id = outer.id();
    let mut inner = outer.add_folder("Inner");
    let inner_id = inner.id();
    let c = inner.add(&object, "c", ()).unwrap().id();
    let b = outer.add(&object, "b", ()).unwrap().id();

    assert_eq!(gui.controllers_recursive(), vec![a, b, c]);
    assert_eq!(gui.folders_recursive(), vec![outer_id, inner_id]);
}

#[test]
fn test_destroy_folder_unlinks_from_parent() {
    let object = Record::new().with("x", 1.0);
    let mut gui = Gui::default();

    let mut folder = gui.add_folder("Temp");
    folder.add(&object, "x", ()).unwrap();
    let removed = folder.destroy();
    assert_eq!(removed, 2);
    assert!(gui.get_folder(gui.root()).unwrap().children().is_empty());
    assert_eq!(gui.folder_count(), 1);
}

#[test]
fn test_destroyed_controller_is_inert() {
    let object = Record::new().with("x", 1.0).with("y", 2.0);
    let mut gui = Gui::default();
    let x = gui.add(&object, "x", ()).unwrap().listen(true).id();
    let y = gui.add(&object, "y", ()).unwrap().id();

    assert!(gui.controller(x).unwrap().destroy());
    assert!(gui.controller(x).is_none());
    assert!(gui.get_controller(x).is_none());
    assert!(gui.scheduler.is_empty());
    assert_eq!(gui.root_mut().controllers(), vec![y]);

    // Ids are not reused
    let z = gui.add(&object, "x", ()).unwrap().id();
    assert_ne!(z, x);
}

#[test]
fn test_open_close_bubbles() {
    let events = log();
    let mut gui = Gui::default();

    let e = events.clone();
    gui.root_mut()
        .on_open_close(move |ev| e.borrow_mut().push(format!("root {}", ev.closed)));
    let folder = gui.add_folder("Lights").close();
    let folder = folder.close();
    folder.open(true);

    assert_eq!(*events.borrow(), vec!["root true", "root false"]);
}

// =============================================================================
// Save / load
// =============================================================================

#[test]
fn test_save_rejects_duplicate_names() {
    let object = Record::new().with("x", 1.0);
    let mut gui = Gui::default();
    gui.add(&object, "x", ()).unwrap();
    gui.add(&object, "x", ()).unwrap();

    let err = gui.save().unwrap_err();
    assert_eq!(
        err.to_string(),
        "cannot save GUI with duplicate property \"x\""
    );
}

#[test]
fn test_save_allows_same_name_in_different_folders() {
    let object = Record::new().with("x", 1.0);
    let mut gui = Gui::default();
    gui.add(&object, "x", ()).unwrap();
    gui.add_folder("Sub").add(&object, "x", ()).unwrap();

    let state = gui.save().unwrap();
    assert!(state.controller("x").is_some());
    assert!(state.folder("Sub").and_then(|s| s.controller("x")).is_some());
}

#[test]
fn test_save_rejects_duplicate_folders() {
    let mut gui = Gui::default();
    gui.add_folder("Same");
    gui.add_folder("Same");
    assert!(matches!(
        gui.save().unwrap_err(),
        GuiError::DuplicateFolder { .. }
    ));
}

#[test]
fn test_save_skips_functions_and_respects_recursive() {
    let object = Record::new()
        .with("x", 1.0)
        .with("go", Function::new(|_| {}));
    let mut gui = Gui::default();
    gui.add(&object, "x", ()).unwrap();
    gui.add(&object, "go", ()).unwrap();
    gui.add_folder("Sub").add(&object, "x", ()).unwrap();

    let flat = gui.root_mut().save(false).unwrap();
    assert_eq!(flat.controllers.len(), 1);
    assert!(flat.folders.is_empty());

    let full = gui.save().unwrap();
    assert_eq!(full.folders.len(), 1);
}

#[test]
fn test_reset_recursive_flag() {
    let object = Record::new().with("x", 1.0).with("y", 1.0);
    let mut gui = Gui::default();
    let x = gui.add(&object, "x", ()).unwrap().id();
    let y = gui.add_folder("Sub").add(&object, "y", ()).unwrap().id();
    gui.controller(x).unwrap().set_value(5.0);
    gui.controller(y).unwrap().set_value(5.0);

    gui.root_mut().reset(false);
    assert_eq!(object.get("x").as_f64(), Some(1.0));
    assert_eq!(object.get("y").as_f64(), Some(5.0));

    gui.reset();
    assert_eq!(object.get("y").as_f64(), Some(1.0));
}
