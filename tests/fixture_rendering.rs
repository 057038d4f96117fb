//! Rendering of the captured fixture snapshots.
//!
//! Each fixture mirrors one debugging session; the tests walk the same
//! variable tree the TUI and `--print` show.

use varscope::inspect::{InspectOptions, Variable};
use varscope::model::BandSize;
use varscope::snapshot::{Scope, Snapshot};
use varscope::view::text::scope_variables;
use varscope::view::{render_json, render_text};

fn load(name: &str) -> Snapshot {
    let path = format!("{}/fixtures/{name}.json", env!("CARGO_MANIFEST_DIR"));
    let text = std::fs::read_to_string(&path).expect("fixture exists");
    Snapshot::from_json_str(&text).expect("fixture decodes")
}

fn locals(snapshot: &Snapshot, options: InspectOptions, depth: usize) -> Vec<Variable> {
    scope_variables(snapshot, Scope::Locals, options, depth)
}

fn find<'a>(variables: &'a [Variable], name: &str) -> &'a Variable {
    variables
        .iter()
        .find(|variable| variable.name == name)
        .unwrap_or_else(|| panic!("no variable named {name}"))
}

fn child_names(variable: &Variable) -> Vec<&str> {
    variable.children.iter().map(|child| child.name.as_str()).collect()
}

// ===== Segmented collections =====

#[test]
fn segmented_lists_show_band_labels() {
    let snapshot = load("segmented_display");
    let vars = locals(&snapshot, InspectOptions::default(), 2);

    assert_eq!(find(&vars, "small_list").children.len(), 50);
    assert_eq!(child_names(find(&vars, "medium_list")), ["[0-99]", "[100-149]"]);
    assert_eq!(
        child_names(find(&vars, "large_list")),
        ["[0-99]", "[100-199]", "[200-249]"]
    );
    assert_eq!(
        child_names(find(&vars, "very_large_list")),
        ["[0-99]", "[100-199]", "[200-299]", "[300-399]", "[400-449]"]
    );
    assert_eq!(child_names(find(&vars, "large_tuple")), ["[0-99]", "[100-199]"]);
}

#[test]
fn threshold_is_strictly_greater_than_band_size() {
    let snapshot = load("segmented_display");
    let vars = locals(&snapshot, InspectOptions::default(), 2);

    let exactly_100 = find(&vars, "exactly_100");
    assert_eq!(exactly_100.children.len(), 100);
    assert_eq!(exactly_100.children[0].name, "[0]");
    assert_eq!(exactly_100.children[99].name, "[99]");

    let exactly_101 = find(&vars, "exactly_101");
    assert_eq!(child_names(exactly_101), ["[0-99]", "[100-100]"]);
    assert_eq!(exactly_101.children[1].value, "(1 items)");
}

#[test]
fn band_nodes_hold_original_indices() {
    let snapshot = load("segmented_display");
    let vars = locals(&snapshot, InspectOptions::default(), 3);

    let band = &find(&vars, "large_list").children[2];
    assert_eq!(band.name, "[200-249]");
    assert_eq!(band.value, "(50 items)");
    assert_eq!(band.type_name, "segment");
    assert!(band.has_children);
    assert_eq!(band.children.len(), 50);
    assert_eq!(band.children[0].name, "[200]");
    assert_eq!(band.children[0].value, "200");
    assert_eq!(band.children[49].name, "[249]");
}

#[test]
fn large_dict_bands_keep_key_order() {
    let snapshot = load("segmented_display");
    let vars = locals(&snapshot, InspectOptions::default(), 3);

    let dict = find(&vars, "large_dict");
    assert_eq!(child_names(dict), ["[0-99]", "[100-149]"]);

    let second = &dict.children[1];
    assert_eq!(second.children[0].name, "'key_100'");
    assert_eq!(second.children[0].value, "200");
    assert_eq!(second.children[49].name, "'key_149'");
}

#[test]
fn nested_values_are_segmented_at_their_own_level() {
    let snapshot = load("segmented_display");
    let vars = locals(&snapshot, InspectOptions::default(), 3);

    let nested = find(&vars, "nested_structure");
    assert_eq!(child_names(nested), ["'small'", "'large'", "'tuple'"]);
    assert_eq!(nested.child("'small'").map(|v| v.children.len()), Some(3));
    assert_eq!(
        nested.child("'large'").map(child_names),
        Some(vec!["[0-99]", "[100-149]"])
    );

    let list_of_dicts = find(&vars, "list_of_dicts");
    assert_eq!(child_names(list_of_dicts), ["[0-99]", "[100-149]"]);
    let first_dict = &list_of_dicts.children[0].children[0];
    assert_eq!(first_dict.name, "[0]");
    assert_eq!(first_dict.type_name, "dict");
}

#[test]
fn custom_band_size_changes_every_level() {
    let snapshot = load("segmented_display");
    let options = InspectOptions::with_band_size(BandSize::new(40).unwrap());
    let vars = locals(&snapshot, options, 3);

    assert_eq!(
        child_names(find(&vars, "small_list")),
        ["[0-39]", "[40-49]"]
    );
    let large = find(&vars, "nested_structure").child("'large'").unwrap();
    assert_eq!(large.children.len(), 4);
    assert_eq!(large.children[3].name, "[120-149]");
}

// ===== Modules and objects =====

#[test]
fn module_attributes_hide_dunder_names() {
    let snapshot = load("module_display");
    let vars = locals(&snapshot, InspectOptions::default(), 2);

    let module = find(&vars, "test_module");
    assert_eq!(module.type_name, "module");
    assert_eq!(child_names(module), ["pi", "add"]);
    assert_eq!(module.child("add").map(|v| v.type_name.as_str()), Some("function"));
}

#[test]
fn show_hidden_reveals_dunder_names_and_globals() {
    let snapshot = load("module_display");
    let mut options = InspectOptions::default();
    options.filter.show_hidden = true;

    let vars = locals(&snapshot, options, 2);
    assert_eq!(child_names(find(&vars, "test_module")), ["__name__", "pi", "add"]);

    let globals = scope_variables(&snapshot, Scope::Globals, options, 1);
    assert!(globals.iter().any(|v| v.name == "__name__"));
}

#[test]
fn hidden_globals_are_not_listed_by_default() {
    let snapshot = load("module_display");
    let globals = scope_variables(&snapshot, Scope::Globals, InspectOptions::default(), 1);
    let names: Vec<&str> = globals.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, ["test", "CustomModule"]);
}

#[test]
fn large_object_attributes_are_banded() {
    let snapshot = load("object_display");
    let vars = locals(&snapshot, InspectOptions::default(), 3);

    let large = find(&vars, "large_obj");
    assert_eq!(large.type_name, "LargeObject");
    assert_eq!(child_names(large), ["[0-99]", "[100-149]"]);
    assert_eq!(large.children[0].value, "(100 attributes)");
    assert_eq!(large.children[1].value, "(50 attributes)");
    assert_eq!(large.children[1].children[0].name, "attr_100");
}

#[test]
fn object_with_only_hidden_attributes_shows_placeholder() {
    let snapshot = load("object_display");
    let vars = locals(&snapshot, InspectOptions::default(), 2);

    let empty = find(&vars, "empty_obj");
    assert!(empty.has_children);
    assert_eq!(child_names(empty), ["(no attributes)"]);
    assert_eq!(empty.children[0].value, "Object has no accessible attributes");
    assert!(!empty.children[0].has_children);
}

#[test]
fn object_attributes_are_sorted_by_name() {
    let snapshot = load("object_display");
    let vars = locals(&snapshot, InspectOptions::default(), 2);
    assert_eq!(child_names(find(&vars, "person")), ["age", "city", "name"]);
}

#[test]
fn repeated_modules_are_segmented() {
    let snapshot = load("nested_module");
    let vars = locals(&snapshot, InspectOptions::default(), 4);

    let modules = find(&vars, "large_with_module")
        .child("'modules'")
        .expect("modules entry");
    assert_eq!(child_names(modules), ["[0-99]", "[100-149]"]);
    let module = &modules.children[1].children[0];
    assert_eq!(module.name, "[100]");
    assert_eq!(module.type_name, "module");
}

// ===== Whole-document output =====

#[test]
fn text_output_lists_both_scopes() {
    let snapshot = load("debug_variables");
    let text = render_text(&snapshot, InspectOptions::default(), 1);

    insta::assert_snapshot!(text, @r"
    # test_debug_variables.py:81
    Locals
      ▸ simple_list = [...] (5 items)  (list)
      ▸ nested_list = [...] (3 items)  (list)
      ▸ mixed_list = [...] (5 items)  (list)
      ▸ simple_tuple = (...) (3 items)  (tuple)
      ▸ nested_tuple = (...) (3 items)  (tuple)
      ▸ simple_dict = {...} (3 items)  (dict)
      ▸ nested_dict = {...} (2 items)  (dict)
      ▸ dict_with_list = {...} (2 items)  (dict)
      ▸ list_with_dict = [...] (3 items)  (list)
      ▸ complex_data = {...} (2 items)  (dict)
      ▸ test_module = <module 'test'>  (module)
      ▸ large_list = [...] (200 items)  (list)
      ▸ tuple_with_module = (...) (3 items)  (tuple)
    Globals
      ▸ test = <module 'test'>  (module)
    ");
}

#[test]
fn text_output_opens_bands_at_depth_two() {
    let snapshot = load("debug_variables");
    let text = render_text(&snapshot, InspectOptions::default(), 2);

    assert!(text.contains("  ▾ large_list = [...] (200 items)  (list)\n"));
    assert!(text.contains("    ▸ [0-99] = (100 items)  (segment)\n"));
    assert!(text.contains("    ▸ [100-199] = (100 items)  (segment)\n"));
    assert!(text.contains("    ▸ [0] = (...) (2 items)  (tuple)\n"));
    assert!(!text.contains("__name__"));
}

#[test]
fn json_output_matches_tree() {
    let snapshot = load("segmented_display");
    let json = render_json(&snapshot, InspectOptions::default(), 2).unwrap();
    let document: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(document["location"], "test_segmented_display.py:53");
    assert_eq!(document["globals"], serde_json::json!([]));

    let exactly_101 = document["locals"]
        .as_array()
        .unwrap()
        .iter()
        .find(|v| v["name"] == "exactly_101")
        .unwrap();
    assert_eq!(exactly_101["type"], "list");
    assert_eq!(exactly_101["has_children"], true);
    assert_eq!(exactly_101["children"][1]["name"], "[100-100]");
    assert_eq!(exactly_101["children"][1]["type"], "segment");
    assert!(exactly_101["children"][1].get("children").is_none());
}

#[test]
fn text_and_json_agree_on_band_count() {
    let snapshot = load("segmented_display");
    let options = InspectOptions::with_band_size(BandSize::new(25).unwrap());

    let text = render_text(&snapshot, options, 2);
    let bands_in_text = text.lines().filter(|line| line.ends_with("(segment)")).count();

    let vars = locals(&snapshot, options, 2);
    let bands_in_tree: usize = vars
        .iter()
        .flat_map(|v| &v.children)
        .filter(|child| child.type_name == "segment")
        .count();

    assert_eq!(bands_in_text, bands_in_tree);
    assert!(bands_in_tree > 0);
}
