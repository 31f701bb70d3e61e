//! CLI module for the tintnotes application
//!
//! This module turns parsed commands into calls on the note store and prints
//! the results.
use std::{
    fs::{read_to_string, OpenOptions},
    io::{stdin, stdout, Write},
    path::{Path, PathBuf},
    process::Command,
};

use console::style;
use log::{debug, info};
use shell_words::split;
use tempfile::Builder;
use uuid::Uuid;

use crate::{
    ansi256, content_preview, parse_date, resolve_color, ColorKind, ColorTag, Commands, Config,
    KeyValueStore, Note, NoteFields, NoteStore, NotesError, Result, Rgb, SearchView, Target,
};

const EDITOR_HINT: &str =
    "<!-- Write the note below. Lines wrapped in <!-- --> are dropped. Save and exit when done. -->";

/// Field overrides shared by `add` and `edit`.
#[derive(Debug, Default)]
pub struct FieldArgs {
    pub title: Option<String>,
    pub content: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
    pub color: Option<ColorKind>,
    pub hex: Option<String>,
    pub edit: bool,
}

/// CLI Application handler - processes CLI commands and interfaces with NoteStore
pub struct App<S: KeyValueStore> {
    /// The note store backend
    store: NoteStore<S>,

    /// Application configuration
    config: Config,

    /// Where `config --set` writes to
    config_path: PathBuf,

    /// Whether to display verbose output
    verbose: bool,
}

impl<S: KeyValueStore> App<S> {
    /// Create a new CLI application with the given store and config
    pub fn new(store: NoteStore<S>, config: Config, config_path: PathBuf, verbose: bool) -> Self {
        Self {
            store,
            config,
            config_path,
            verbose,
        }
    }

    pub fn store(&self) -> &NoteStore<S> {
        &self.store
    }

    /// Run the CLI application with the given command
    pub fn run(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::Add {
                title,
                content,
                location,
                date,
                color,
                hex,
                edit,
            } => self.add_note(FieldArgs {
                title: Some(title),
                content,
                location,
                date,
                color,
                hex,
                edit,
            })?,

            Commands::List { json, brief } => self.list_notes(json, brief)?,

            Commands::Search { query, json } => self.search_notes(&query, json)?,

            Commands::View { target, json } => self.view_note(&target, json)?,

            Commands::Edit {
                target,
                title,
                content,
                location,
                date,
                color,
                hex,
                edit,
            } => self.edit_note(
                &target,
                FieldArgs {
                    title,
                    content,
                    location,
                    date,
                    color,
                    hex,
                    edit,
                },
            )?,

            Commands::Delete {
                targets,
                query,
                force,
            } => self.delete_notes(&targets, query.as_deref(), force)?,

            Commands::Colors => self.show_colors(),

            Commands::Config { show, set, reset } => self.handle_config(show, set, reset)?,
        }

        Ok(())
    }

    /// Applies the overrides in `args` on top of `fields`.
    fn apply_fields(&self, mut fields: NoteFields, args: FieldArgs) -> Result<NoteFields> {
        if args.content.is_some() && args.edit {
            return Err(NotesError::ApplicationError {
                message: "Cannot specify both --content and --edit options".to_string(),
            });
        }

        if let Some(title) = args.title {
            fields.title = title;
        }
        if let Some(content) = args.content {
            fields.content = content;
        }
        if let Some(location) = args.location {
            fields.location = location;
        }
        if let Some(date) = args.date {
            fields.date = parse_date(&date)?;
        }
        if let Some(color_tag) = resolve_color(args.color, args.hex.as_deref(), &fields.color_tag)? {
            fields.color_tag = color_tag;
        }
        if args.edit {
            fields.content = self.open_editor(&fields.title, &fields.content)?;
        }

        Ok(fields)
    }

    fn add_note(&mut self, args: FieldArgs) -> Result<()> {
        let fields = self.apply_fields(NoteFields::default(), args)?;
        let note = Note::new(fields);
        let id = note.id;

        self.store.add(note);
        println!("Note created with ID: {}", id);
        Ok(())
    }

    fn edit_note(&mut self, target: &str, args: FieldArgs) -> Result<()> {
        let position = Target::parse(target)?.resolve(&self.store)?;
        let mut note = self.store.list()[position].clone();

        let fields = self.apply_fields(note.fields(), args)?;
        note.update_content(fields);
        let id = note.id;

        if !self.store.update(note) {
            return Err(NotesError::NoteNotFound { id: id.to_string() });
        }
        println!("Note {} updated", id);
        Ok(())
    }

    fn list_notes(&self, json: bool, brief: bool) -> Result<()> {
        let rows: Vec<(usize, &Note)> = self.store.list().iter().enumerate().collect();
        if json {
            return self.display_notes_json(rows.iter().map(|(_, note)| *note));
        }
        self.display_notes_text(&rows, brief);
        Ok(())
    }

    /// Matches for `query`, labelled with their full-list positions so the
    /// printed numbers work as `view`/`edit`/`delete` targets.
    fn search_rows(&self, query: &str) -> Vec<(usize, &Note)> {
        let rows: Vec<(usize, &Note)> = SearchView::new(self.store.list(), query).entries().collect();
        debug!("Query '{}' matched {} notes", query, rows.len());
        rows
    }

    fn search_notes(&self, query: &str, json: bool) -> Result<()> {
        let rows = self.search_rows(query);

        if json {
            return self.display_notes_json(rows.iter().map(|(_, note)| *note));
        }

        if rows.is_empty() {
            println!("No notes found matching query: \"{}\"", query);
            return Ok(());
        }
        self.display_notes_text(&rows, false);
        Ok(())
    }

    fn view_note(&self, target: &str, json: bool) -> Result<()> {
        let position = Target::parse(target)?.resolve(&self.store)?;
        let note = &self.store.list()[position];

        if json {
            println!("{}", serde_json::to_string_pretty(note)?);
            return Ok(());
        }

        println!("{} {}", swatch(&note.color_tag), style(&note.title).bold());
        println!("ID:       {}", note.id);
        println!("Position: {}", position);
        println!("Colour:   {}", describe_color(&note.color_tag));
        if !note.location.is_empty() {
            println!("Location: {}", note.location);
        }
        println!("Date:     {}", note.date.format("%Y-%m-%d"));
        println!("Created:  {}", note.date_created.format("%Y-%m-%d %H:%M:%S"));
        println!("Modified: {}", note.date_modified.format("%Y-%m-%d %H:%M:%S"));
        if !note.content.is_empty() {
            println!("\n{}", note.content);
        }
        Ok(())
    }

    fn delete_notes(&mut self, targets: &[String], query: Option<&str>, force: bool) -> Result<()> {
        let ids = self.resolve_delete_targets(targets, query)?;
        let positions = self.store.positions_of(&ids);

        if !force {
            println!("You are about to delete the following notes:");
            for &position in &positions {
                let note = &self.store.list()[position];
                println!("  [{}] {} ({})", position, note.title, note.id);
            }

            println!("\nThis action cannot be undone!");
            print!("Are you sure? [y/N]: ");
            stdout().flush().map_err(NotesError::Io)?;

            let mut input = String::new();
            stdin().read_line(&mut input).map_err(NotesError::Io)?;

            let input = input.trim().to_lowercase();
            if input != "y" && input != "yes" {
                println!("Deletion cancelled.");
                return Ok(());
            }
        }

        let count = positions.len();
        self.store.delete(positions);
        println!("Deleted {} note{}", count, if count == 1 { "" } else { "s" });
        Ok(())
    }

    /// Turns targets into ids. With a query, positions count rows of that search.
    fn resolve_delete_targets(&self, targets: &[String], query: Option<&str>) -> Result<Vec<Uuid>> {
        let view = query.map(|q| SearchView::new(self.store.list(), q));
        let mut ids = Vec::with_capacity(targets.len());

        for raw in targets {
            let id = match (Target::parse(raw)?, &view) {
                (Target::Position(row), Some(view)) => view
                    .get(row)
                    .map(|note| note.id)
                    .ok_or(NotesError::InvalidPosition {
                        position: row,
                        len: view.len(),
                    })?,
                (target, _) => {
                    let position = target.resolve(&self.store)?;
                    self.store.list()[position].id
                }
            };
            ids.push(id);
        }

        Ok(ids)
    }

    fn show_colors(&self) {
        for tag in ColorTag::all_fixed() {
            println!("{} {:<7} #{}", swatch(&tag), tag.label(), tag.color().to_hex());
        }
        println!(
            "{} {:<7} any RRGGBB via --hex",
            swatch(&ColorTag::Custom(None)),
            ColorTag::Custom(None).label()
        );
    }

    fn handle_config(&mut self, show: bool, set: Option<String>, reset: bool) -> Result<()> {
        let show = show || (set.is_none() && !reset);

        if reset {
            self.config = Config::default();
            self.config.save(&self.config_path)?;
            println!("Configuration reset to defaults");
        }

        if let Some(assignment) = set {
            self.config.set(&assignment)?;
            self.config.save(&self.config_path)?;
            println!("Configuration updated");
        }

        if show {
            println!("Config file: {}", self.config_path.display());
            println!("{}", serde_json::to_string_pretty(&self.config)?);
        }

        Ok(())
    }

    /// Display notes in JSON format, using the stored record shape
    fn display_notes_json<'a>(&self, notes: impl Iterator<Item = &'a Note>) -> Result<()> {
        let notes: Vec<&Note> = notes.collect();
        println!("{}", serde_json::to_string_pretty(&notes)?);
        Ok(())
    }

    /// Display notes in text format
    fn display_notes_text(&self, rows: &[(usize, &Note)], brief: bool) {
        if rows.is_empty() {
            println!("No notes yet. Create one with `tintnotes add -T <title>`.");
            return;
        }

        let term_width = terminal_size::terminal_size()
            .map(|(w, _)| w.0 as usize)
            .unwrap_or(80);

        for (i, (position, note)) in rows.iter().enumerate() {
            if brief {
                println!("[{:>3}] {} {}", position, swatch(&note.color_tag), note.title);
                continue;
            }

            if i > 0 {
                println!("{}", "-".repeat(term_width.min(50)));
            }

            println!(
                "[{}] {} {}",
                position,
                swatch(&note.color_tag),
                style(&note.title).bold()
            );

            let mut meta = vec![note.date.format("%Y-%m-%d").to_string()];
            if !note.location.is_empty() {
                meta.push(note.location.clone());
            }
            println!("{}", style(meta.join(" | ")).dim());

            let preview = content_preview(&note.content, term_width.saturating_sub(10).max(20));
            if !preview.is_empty() {
                println!("{}", preview);
            }
        }

        if self.verbose {
            println!(
                "\n{} of {} note{}",
                rows.len(),
                self.store.len(),
                if self.store.len() == 1 { "" } else { "s" }
            );
        }
    }

    fn open_editor(&self, title: &str, existing_content: &str) -> Result<String> {
        let temp_file = Builder::new().suffix(".md").tempfile()?;
        let temp_path = temp_file.path().to_path_buf();

        {
            let mut file = OpenOptions::new().write(true).open(&temp_path)?;
            writeln!(file, "<!-- {} -->", title)?;
            writeln!(file, "{}", EDITOR_HINT)?;
            write!(file, "{}", existing_content)?;
        }

        let editor_cmd = self.config.get_editor_command();
        info!("Opening editor to write note content. Save and exit when done...");
        launch_editor(&editor_cmd, &temp_path)?;

        let content = read_to_string(&temp_path)?;
        Ok(process_editor_content(&content))
    }
}

fn launch_editor(editor_cmd: &str, file_path: &Path) -> Result<()> {
    let args = split(editor_cmd).map_err(|e| NotesError::EditorError {
        message: format!("Failed to parse editor command: {}", e),
    })?;

    let Some((program, rest)) = args.split_first() else {
        return Err(NotesError::EditorError {
            message: "Empty editor command".to_string(),
        });
    };

    let status = Command::new(program)
        .args(rest)
        .arg(file_path)
        .status()
        .map_err(|e| NotesError::EditorError {
            message: format!("Failed to execute editor command '{}': {}", program, e),
        })?;

    if !status.success() {
        return Err(NotesError::EditorError {
            message: "Editor exited with non-zero status".to_string(),
        });
    }

    Ok(())
}

/// Drops single-line `<!-- ... -->` comments and trailing blank lines
fn process_editor_content(content: &str) -> String {
    content
        .lines()
        .filter(|line| {
            let line = line.trim();
            !(line.starts_with("<!--") && line.ends_with("-->"))
        })
        .collect::<Vec<&str>>()
        .join("\n")
        .trim_end()
        .to_string()
}

/// A coloured dot for the tag
fn swatch(tag: &ColorTag) -> String {
    if *tag == ColorTag::None {
        return style("○").dim().to_string();
    }
    style("●").color256(ansi256(tag.color())).to_string()
}

fn describe_color(tag: &ColorTag) -> String {
    match tag {
        ColorTag::Custom(Some(hex)) if Rgb::from_hex(hex).is_some() => {
            format!("{} (#{})", tag.label(), tag.color().to_hex())
        }
        ColorTag::Custom(Some(hex)) => format!("{} ('{}' is not valid, shown as black)", tag.label(), hex),
        ColorTag::Custom(None) => format!("{} (no hex, shown as black)", tag.label()),
        _ => tag.label().to_string(),
    }
}
