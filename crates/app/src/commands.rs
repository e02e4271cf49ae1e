use anyhow::Context;

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Print the number of lines.
    Count { file: std::path::PathBuf },

    /// Print a window of lines.
    Show {
        file: std::path::PathBuf,

        #[arg(long, default_value_t = 0)]
        start: usize,

        #[arg(long, default_value_t = 20)]
        lines: usize,
    },

    /// Print the number of the first line containing QUERY.
    Search {
        file: std::path::PathBuf,
        query: String,

        /// Search towards the start of the file.
        #[arg(long)]
        backward: bool,

        /// Line to start from; backward searches default to the last line.
        #[arg(long)]
        from: Option<usize>,
    },

    /// Replace lines and save the result.
    Edit {
        file: std::path::PathBuf,

        #[arg(long)]
        line: usize,

        #[arg(long, default_value_t = 0)]
        delete: usize,

        /// Inserted text; a literal `\n` separates lines.
        #[arg(long, default_value = "")]
        text: String,

        /// Destination; defaults to overwriting FILE.
        #[arg(long, value_name = "PATH")]
        output: Option<std::path::PathBuf>,
    },
}

impl Command {
    fn file(&self) -> &std::path::Path {
        match self {
            Self::Count { file }
            | Self::Show { file, .. }
            | Self::Search { file, .. }
            | Self::Edit { file, .. } => file,
        }
    }
}

/// Runs one command, writing its output to `out`. Returns `false` when a
/// search found nothing.
///
/// # Errors
///
/// Fails if the file cannot be opened, the edit cannot be applied, the
/// result cannot be saved, or `out` cannot be written.
pub fn run(
    command: &Command,
    config: editor_core::EngineConfig,
    out: &mut impl std::io::Write,
) -> anyhow::Result<bool> {
    let path = command.file();
    let mut engine = editor_core::Engine::open_with_config(path, config)
        .with_context(|| format!("failed to open {}", path.display()))?;

    match command {
        Command::Count { .. } => {
            writeln!(out, "{}", engine.total_lines())?;
        }
        Command::Show { start, lines, .. } => {
            out.write_all(engine.get_block(*start, *lines))?;
        }
        Command::Search {
            query,
            backward,
            from,
            ..
        } => {
            let hit = if *backward {
                engine.search_backward(query.as_bytes(), from.unwrap_or(usize::MAX))
            } else {
                engine.search(query.as_bytes(), from.unwrap_or(0))
            };

            let Some(line) = hit else {
                return Ok(false);
            };

            writeln!(out, "{line}")?;
        }
        Command::Edit {
            line,
            delete,
            text,
            output,
            ..
        } => {
            // shells pass `\n` through literally
            let text = text.replace("\\n", "\n");

            engine
                .apply_edit(*line, *delete, text.as_bytes())
                .context("failed to apply edit")?;

            let target = output.as_deref().unwrap_or(path);

            anyhow::ensure!(engine.save(target), "failed to save {}", target.display());
            writeln!(out, "{}", engine.total_lines())?;
        }
    }

    engine.close();

    Ok(true)
}
