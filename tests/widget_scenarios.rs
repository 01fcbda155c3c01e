use std::time::Duration;

use multiselect::io::client::{HttpCreationClient, resolve_creation};
use multiselect::io::hydrate::hydrate;
use multiselect::model::{Item, ItemId, Targets, WidgetConfig};
use multiselect::ops::creation::{Resolution, is_temp_id};
use multiselect::ops::keys::Key;
use multiselect::ops::widget::{Controller, Picker, WidgetEvent};
use multiselect::render::{self, Snapshot, classes, markup};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn id(s: &str) -> ItemId {
    ItemId::parse(s).unwrap()
}

fn controller(config: WidgetConfig, selected: Vec<Item>, options: Vec<Item>) -> Controller<Snapshot> {
    let mut picker = Picker::new(config, Targets::default());
    let server_badges = selected.len();
    picker.hydrate(selected, options);
    Controller::connect(picker, Snapshot::with_server_badges(server_badges))
}

#[test]
fn typing_new_name_and_enter_creates_badge() {
    let config = WidgetConfig::builder().allow_create(true).build();
    let mut c = controller(config, vec![], vec![]);

    c.dispatch(WidgetEvent::Focus);
    c.dispatch(WidgetEvent::Input("rpg".into()));
    let visible: Vec<_> = c.surface().visible_rows().collect();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, None);
    assert_eq!(visible[0].label, "rpg");

    let pending = c.dispatch(WidgetEvent::Key(Key::Enter));
    // No endpoint configured, so nothing goes to a server
    assert!(pending.is_none());

    let selection: Vec<_> = c.picker().selection().iter().collect();
    assert_eq!(selection.len(), 1);
    let (temp_id, name) = selection[0];
    assert!(is_temp_id(temp_id));
    assert_eq!(name, "rpg");

    assert_eq!(c.surface().hidden_values(), vec![temp_id.as_str()]);
    assert_eq!(c.surface().badge_names(), vec!["rpg"]);
    assert_eq!(c.surface().input_value, "");
}

#[test]
fn clicking_option_selects_and_styles_row() {
    let config = WidgetConfig::default();
    let theme = config.theme;
    let mut c = controller(
        config,
        vec![],
        vec![Item::new(id("1"), "Action"), Item::new(id("2"), "Puzzle")],
    );
    let puzzle_before = c.surface().row(&id("2")).cloned();

    c.dispatch(WidgetEvent::Focus);
    c.dispatch(WidgetEvent::ClickOption(id("1")));

    let selection: Vec<_> = c.picker().selection().iter().collect();
    assert_eq!(selection, vec![(&id("1"), "Action")]);
    assert_eq!(c.surface().hidden_values(), vec!["1"]);

    let action = c.surface().row(&id("1")).unwrap();
    assert!(action.selected);
    assert_eq!(action.class, classes::option_row(theme, true, false));
    assert_eq!(c.surface().row(&id("2")).cloned(), puzzle_before);
}

#[test]
fn backspace_on_empty_input_clears_last_badge() {
    let mut c = controller(
        WidgetConfig::default(),
        vec![Item::new(id("5"), "Strategy")],
        vec![Item::new(id("5"), "Strategy")],
    );
    assert_eq!(c.surface().hidden_values(), vec!["5"]);

    c.dispatch(WidgetEvent::Key(Key::Backspace));

    assert!(c.picker().selection().is_empty());
    assert_eq!(c.surface().hidden_values(), vec![""]);
    assert!(c.surface().badges.is_empty());
    assert_eq!(c.surface().server_badges, 0);
    assert_eq!(c.surface().placeholder, c.picker().config().placeholder);
}

#[test]
fn rendered_markup_hydrates_back() {
    let page = r#"
<div data-controller="multiselect" data-multiselect-input-name-value="tag_ids[]">
  <div data-multiselect-target="selectedItems">
    <span data-item-id="1"><span data-item-name="Co-op">Co-op</span></span>
  </div>
  <input data-multiselect-target="input">
  <div data-multiselect-target="hiddenInputs"></div>
  <div data-multiselect-target="dropdown">
    <div data-multiselect-target="optionsList">
      <div data-option-id="1" data-option-name="Co-op"><span class="flex-1">Co-op</span></div>
      <div data-option-id="2" data-option-name="R&amp;D"><span class="flex-1">R&amp;D</span></div>
    </div>
  </div>
</div>"#;

    let mut c = Controller::connect(hydrate(page).unwrap().into_picker(), Snapshot::default());
    c.dispatch(WidgetEvent::ClickOption(id("2")));

    let picker = c.picker();
    let config = picker.config();
    let badges = render::badges(picker.selection(), &config.badge_class, config.theme);
    let rebuilt = format!(
        "<div data-controller=\"multiselect\" data-multiselect-input-name-value=\"tag_ids[]\">\
         <div data-multiselect-target=\"selectedItems\">{}</div>\
         <input data-multiselect-target=\"input\">\
         <div data-multiselect-target=\"hiddenInputs\">{}</div>\
         <div data-multiselect-target=\"dropdown\"><div data-multiselect-target=\"optionsList\">{}</div></div>\
         </div>",
        markup::badges_html(&badges),
        markup::hidden_inputs_html(&c.surface().hidden_inputs),
        markup::rows_html(&c.surface().rows),
    );

    let again = hydrate(&rebuilt).unwrap();
    let names = |items: &[Item]| -> Vec<(String, String)> {
        items
            .iter()
            .map(|i| (i.id.to_string(), i.name.clone()))
            .collect()
    };
    assert_eq!(
        names(&again.selected),
        vec![("1".into(), "Co-op".into()), ("2".into(), "R&D".into())]
    );
    assert_eq!(
        names(&again.options),
        vec![("1".into(), "Co-op".into()), ("2".into(), "R&D".into())]
    );
    assert_eq!(again.skipped_badges, 0);
}

#[tokio::test]
async fn server_id_replaces_temporary_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tags"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({ "id": 501 })))
        .mount(&server)
        .await;

    let config = WidgetConfig::builder()
        .allow_create(true)
        .item_type("tag")
        .api_endpoint(format!("{}/tags", server.uri()))
        .build();
    let timeout = Duration::from_secs(5);
    let client = HttpCreationClient::from_config(&config, None, timeout)
        .unwrap()
        .unwrap();
    let mut c = controller(config, vec![], vec![Item::new(id("1"), "Action")]);

    c.dispatch(WidgetEvent::Input("Indie".into()));
    let pending = c.dispatch(WidgetEvent::Key(Key::Enter)).unwrap();
    // Optimistic state is visible before the server answers
    assert_eq!(c.surface().hidden_values(), vec![pending.temp_id.as_str()]);

    let resolution = resolve_creation(&client, "tag", &pending, timeout).await;
    c.dispatch(WidgetEvent::Resolved {
        temp_id: pending.temp_id.clone(),
        resolution,
    });

    assert_eq!(c.surface().hidden_values(), vec!["501"]);
    assert_eq!(c.surface().badges[0].id, id("501"));
    assert!(c.surface().row(&id("501")).is_some());
    assert!(c.surface().row(&pending.temp_id).is_none());
}

#[test]
fn late_resolution_after_removal_is_ignored() {
    let config = WidgetConfig::builder()
        .allow_create(true)
        .api_endpoint("/tags")
        .build();
    let mut c = controller(config, vec![], vec![]);

    c.dispatch(WidgetEvent::Input("Indie".into()));
    let pending = c.dispatch(WidgetEvent::Key(Key::Enter)).unwrap();
    c.dispatch(WidgetEvent::RemoveBadge(pending.temp_id.clone()));
    c.dispatch(WidgetEvent::Resolved {
        temp_id: pending.temp_id.clone(),
        resolution: Resolution::Created(id("9")),
    });

    assert!(c.picker().selection().is_empty());
    assert_eq!(c.surface().hidden_values(), vec![""]);
    assert!(c.surface().row(&id("9")).is_none());
}
