use std::path::Path;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::hydrate::{self, Hydrated};
use crate::io::logging;
use crate::model::ItemId;
use crate::ops::widget::{Controller, WidgetEvent};
use crate::render::{self, NullSurface};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let settings = config_io::load_settings(cli.config.as_deref())?;
    // Held until return so buffered log lines reach the file
    let _log_guard = logging::init_logging(&settings.log)?;

    match cli.command {
        Commands::Pick(args) => cmd_pick(args, &settings),
        Commands::Render(args) => cmd_render(args),
    }
}

fn load_markup(path: &Path) -> Result<Hydrated, Box<dyn std::error::Error>> {
    let html = config_io::read_text(path)?;
    let hydrated = hydrate::hydrate(&html)?;
    if hydrated.skipped_badges > 0 {
        tracing::warn!(
            path = %path.display(),
            skipped = hydrated.skipped_badges,
            "some badges had no readable name"
        );
    }
    Ok(hydrated)
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_pick(
    args: PickArgs,
    settings: &crate::model::Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let picker = load_markup(&args.markup)?.into_picker();
    let submission = crate::tui::run(picker, settings)?;
    print!("{}", format_submission(&submission));
    Ok(())
}

fn cmd_render(args: RenderArgs) -> Result<(), Box<dyn std::error::Error>> {
    let hydrated = load_markup(&args.markup)?;
    let skipped_badges = hydrated.skipped_badges;
    let mut controller = Controller::connect(hydrated.into_picker(), NullSurface);

    for raw in &args.select {
        let id = ItemId::parse(raw).ok_or_else(|| format!("invalid item id '{}'", raw))?;
        let picker = controller.picker();
        let event = if picker.rows().get(&id).is_some() {
            WidgetEvent::ClickOption(id)
        } else if picker.selection().contains(&id) {
            WidgetEvent::RemoveBadge(id)
        } else {
            return Err(format!("no option with id '{}' in {}", raw, args.markup.display()).into());
        };
        controller.dispatch(event);
    }

    let picker = controller.picker();
    let config = picker.config();
    let inputs = render::hidden_inputs(picker.selection(), &config.input_name);
    let rows = render::row_views(picker);

    if args.json {
        let out = RenderJson {
            item_type: config.item_type.clone(),
            selected: picker
                .selection()
                .iter()
                .map(|(id, name)| SelectedJson {
                    id: id.clone(),
                    name: name.to_string(),
                })
                .collect(),
            hidden_inputs: inputs,
            rows,
            skipped_badges,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        let badges = render::badges(picker.selection(), &config.badge_class, config.theme);
        print!("{}", format_regions(&badges, &inputs, &rows));
    }
    Ok(())
}
