//! Interactive pattern tester.
//!
//! `/pattern/` sets the current pattern; any other line is matched against
//! it, printing spans and captures. Ctrl-D exits.

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::{Regex, RegexOptions};

pub fn run_repl() {
    let mut rl = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(err) => {
            eprintln!("Failed to initialize line editor: {}", err);
            std::process::exit(1);
        }
    };

    let history_path = history_path();
    if let Some(ref path) = history_path {
        let _ = rl.load_history(path);
    }

    println!("Enter /pattern/ to set the pattern, then lines of text to match. Ctrl-D exits.");
    let mut current: Option<Regex> = None;

    loop {
        let prompt = if current.is_some() { "* " } else { "> " };
        match rl.readline(prompt) {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                if let Some(pat) = line.strip_prefix('/').and_then(|s| s.strip_suffix('/')) {
                    match Regex::new(pat, RegexOptions::new()) {
                        Ok(re) => {
                            println!("pattern set: /{}/", pat);
                            current = Some(re);
                        }
                        Err(err) => eprintln!("Error: {}", err),
                    }
                    continue;
                }
                let re = match &current {
                    Some(re) => re,
                    None => {
                        eprintln!("No pattern set; enter /pattern/ first.");
                        continue;
                    }
                };
                let mut any = false;
                for m in re.all_matches(&line) {
                    any = true;
                    println!("[{}..{}] {:?}", m.start(), m.end(), m.text());
                    for i in 1..=m.group_count() {
                        if let Some(text) = m.group_at(i) {
                            println!("  ${} = {:?}", i, text);
                        }
                    }
                    for name in m.group_names() {
                        if let Some(text) = m.named_group(name) {
                            println!("  ${{{}}} = {:?}", name, text);
                        }
                    }
                }
                if !any {
                    println!("no match");
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C: drop the current input line
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Error: {}", err);
                break;
            }
        }
    }

    if let Some(ref path) = history_path {
        let _ = rl.save_history(path);
    }
}

fn history_path() -> Option<std::path::PathBuf> {
    let home = std::env::var("HOME").ok()?;
    let dir = std::path::PathBuf::from(home).join(".onigiri");
    let _ = std::fs::create_dir_all(&dir);
    Some(dir.join("history"))
}
