use std::error::Error;
use std::fmt::Write as _;
use std::io::BufRead;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::{debug, info};
use tokio::sync::mpsc;

use recipe_browser::dom::{has_class, Element, Node};
use recipe_browser::page::is_collapsed;
use recipe_browser::render::{
    FAVORITE_BUTTON_CLASS, FAVORITE_GLYPH, INGREDIENTS_PANEL_CLASS, STEPS_PANEL_CLASS,
};
use recipe_browser::{
    BrowserConfig, Event, FileStore, Input, KeyValueStore, RecipeBrowser, RecipeId, Session,
};

#[derive(Parser, Debug)]
#[command(name = "recipe-browser", version, about = "Browse, filter and search recipes")]
struct Cli {
    /// Configuration file (defaults to recipe-browser.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Storage file for favorites, overrides the configuration
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the page as a standalone HTML document
    Render {
        #[command(flatten)]
        view: ViewArgs,

        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Print the matching recipes, one per line
    List {
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Read commands from stdin and print the view after each change
    Interactive,
}

#[derive(Args, Debug)]
struct ViewArgs {
    /// all, easy, medium, hard, quick or favorites
    #[arg(long, default_value = "all")]
    filter: String,

    /// none, name or time
    #[arg(long, default_value = "none")]
    sort: String,

    /// Case-insensitive text matched against title, description and ingredients
    #[arg(long, default_value = "")]
    search: String,

    /// Flip favorite status of a recipe before showing (repeatable)
    #[arg(long = "toggle-favorite", value_name = "ID")]
    toggle_favorite: Vec<RecipeId>,
}

const HELP: &str = "\
commands:
  filter <all|easy|medium|hard|quick|favorites>
  sort <none|name|time>
  search <text>      (applied after a short pause)
  clear
  fav <id>
  steps <id>
  ingredients <id>
  quit";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => BrowserConfig::load_from(path)?,
        None => BrowserConfig::load()?,
    };
    let storage_path = cli.storage.unwrap_or_else(|| config.storage_path.clone());
    debug!("using storage {}", storage_path.display());

    let store = FileStore::new(storage_path);
    let browser = RecipeBrowser::builder(store).config(&config).build();

    match cli.command {
        Command::Render { view, output } => {
            let browser = apply_view(browser, &view);
            let document = browser.page().to_document();
            match output {
                Some(path) => {
                    std::fs::write(&path, document)?;
                    info!("wrote {}", path.display());
                }
                None => print!("{}", document),
            }
        }
        Command::List { view } => {
            let browser = apply_view(browser, &view);
            print!("{}", list_text(&browser));
        }
        Command::Interactive => interactive(browser).await?,
    }

    Ok(())
}

fn apply_view<S: KeyValueStore>(mut browser: RecipeBrowser<S>, view: &ViewArgs) -> RecipeBrowser<S> {
    for id in &view.toggle_favorite {
        browser.toggle_favorite(*id);
    }
    browser.handle(Event::FilterClicked(view.filter.clone()));
    browser.handle(Event::SortClicked(view.sort.clone()));
    if !view.search.is_empty() {
        browser.submit_search(&view.search);
    }
    browser
}

fn list_text<S: KeyValueStore>(browser: &RecipeBrowser<S>) -> String {
    let mut out = String::new();
    for id in browser.visible_ids() {
        let Some(recipe) = browser.catalog().get(id) else {
            continue;
        };
        let mark = if browser.favorites().is_favorite(id) {
            "*"
        } else {
            " "
        };
        let _ = writeln!(
            out,
            "{:>3} {} {} ({} mins, {})",
            recipe.id, mark, recipe.title, recipe.time, recipe.difficulty
        );
    }
    if let Some(count) = browser.page().count() {
        let _ = writeln!(out, "{}", count);
    }
    out
}

async fn interactive<S: KeyValueStore>(browser: RecipeBrowser<S>) -> Result<(), Box<dyn Error>> {
    let (tx, rx) = mpsc::channel(32);

    // Blocking stdin reads live on their own thread so quitting never waits
    // for another line
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match parse_line(&line) {
                Ok(Some(input)) => {
                    if tx.blocking_send(input).is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(msg) => eprintln!("{}\n{}", msg, HELP),
            }
        }
    });

    println!("{}", HELP);
    let session = Session::new(browser);
    print!("{}", page_text(session.browser()));
    session.run(rx, |browser| print!("{}", page_text(browser))).await;
    Ok(())
}

/// `Ok(None)` means quit
fn parse_line(line: &str) -> Result<Option<Input>, String> {
    let line = line.trim();
    let (command, arg) = line.split_once(' ').unwrap_or((line, ""));
    let arg = arg.trim();
    let id = || {
        arg.parse::<RecipeId>()
            .map_err(|_| format!("expected a recipe id, got {:?}", arg))
    };

    let input = match command {
        "quit" | "exit" => return Ok(None),
        "filter" => Input::Filter(arg.to_string()),
        "sort" => Input::Sort(arg.to_string()),
        "search" => Input::Type(arg.to_string()),
        "clear" => Input::Clear,
        "fav" => Input::Favorite(id()?),
        "steps" => Input::Steps(id()?),
        "ingredients" => Input::Ingredients(id()?),
        other => return Err(format!("unknown command {:?}", other)),
    };
    Ok(Some(input))
}

/// Plain-text rendering of the cards on the page, with open panels
fn page_text<S: KeyValueStore>(browser: &RecipeBrowser<S>) -> String {
    let mut out = String::from("\n");
    let page = browser.page();

    if let Some(container) = page.container() {
        for card in container.child_elements() {
            let favorite = card
                .find(has_class(FAVORITE_BUTTON_CLASS))
                .is_some_and(|b| b.text_content() == FAVORITE_GLYPH);
            let title = card
                .find(|el| el.tag() == "h3")
                .map(Element::text_content)
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "{:>3} {} {}",
                card.data("id").unwrap_or("?"),
                if favorite { "*" } else { " " },
                title
            );

            for panel in [STEPS_PANEL_CLASS, INGREDIENTS_PANEL_CLASS] {
                if let Some(panel) = card.find(has_class(panel)) {
                    if !is_collapsed(panel) {
                        for list in panel.child_elements() {
                            write_list(&mut out, list, 3);
                        }
                    }
                }
            }
        }
    }
    if let Some(count) = page.count() {
        let _ = writeln!(out, "{}", count);
    }
    out
}

fn write_list(out: &mut String, list: &Element, depth: usize) {
    for item in list.child_elements() {
        let label: String = item
            .child_nodes()
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(_) => None,
            })
            .collect();
        let _ = writeln!(out, "{}- {}", "  ".repeat(depth), label);
        for nested in item.child_elements() {
            write_list(out, nested, depth + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipe_browser::MemoryStore;

    #[test]
    fn test_parse_line() {
        assert_eq!(
            parse_line("filter quick"),
            Ok(Some(Input::Filter("quick".to_string())))
        );
        assert_eq!(
            parse_line("search  olive oil "),
            Ok(Some(Input::Type("olive oil".to_string())))
        );
        assert_eq!(parse_line("steps 3"), Ok(Some(Input::Steps(3))));
        assert_eq!(parse_line("clear"), Ok(Some(Input::Clear)));
        assert_eq!(parse_line("quit"), Ok(None));
        assert!(parse_line("fav three").is_err());
        assert!(parse_line("dance").is_err());
    }

    #[test]
    fn test_list_text() {
        let browser = RecipeBrowser::builder(MemoryStore::new()).build();
        let view = ViewArgs {
            filter: "quick".to_string(),
            sort: "time".to_string(),
            search: String::new(),
            toggle_favorite: vec![7],
        };
        let text = list_text(&apply_view(browser, &view));

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "  4   Greek Salad (15 mins, easy)",
                "  6   Vegetable Stir Fry (20 mins, easy)",
                "  1   Classic Spaghetti Carbonara (25 mins, easy)",
                "  7 * Pad Thai (30 mins, medium)",
                "Showing 4 of 8 recipes",
            ]
        );
    }

    #[test]
    fn test_page_text_shows_open_panels() {
        let mut session = Session::new(RecipeBrowser::builder(MemoryStore::new()).build());
        session.send(Input::Filter("hard".to_string()));
        session.send(Input::Steps(3));

        let text = page_text(session.browser());
        assert!(text.contains("  3   Homemade Croissants"));
        assert!(text.contains("      - Layer Butter\n        - Roll dough."));
        assert!(text.contains("Showing 2 of 8 recipes"));
    }
}
