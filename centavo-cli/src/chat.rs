//! Terminal chat with the keyword assistant.
//!
//! The answers come from `centavo_core::assistant` over a fresh
//! snapshot; no network, no model. Turns are appended to a daily
//! markdown log under the centavo home.

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io::{self, Stdout};
use std::path::PathBuf;

use centavo_core::aggregate::FinanceSnapshot;
use centavo_core::assistant;

use crate::config::Config;
use crate::dashboard::load_snapshot;
use crate::store::Store;

#[derive(Clone, Debug)]
struct Msg {
    role: Role,
    content: String,
}

#[derive(Clone, Debug)]
enum Role {
    User,
    Assistant,
}

struct ChatLog {
    path: PathBuf,
}

impl ChatLog {
    fn open_today() -> Result<Self> {
        let home = crate::state::ensure_centavo_home()?;
        let dir = home.join("chat");
        std::fs::create_dir_all(&dir)?;
        let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
        let path = dir.join(format!("{today}.md"));
        Ok(Self { path })
    }

    fn append(&mut self, role: &str, msg: &str) -> Result<()> {
        use std::io::Write;
        let mut f = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(
            f,
            "- {} [{}] {}",
            chrono::Utc::now().to_rfc3339(),
            role,
            msg.replace('\n', " ")
        )?;
        Ok(())
    }
}

pub fn run_chat(store: &Store, config: &Config) -> Result<()> {
    let snapshot = load_snapshot(store, config)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = chat_loop(&mut terminal, &snapshot, config);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    res
}

fn chat_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    snapshot: &FinanceSnapshot,
    config: &Config,
) -> Result<()> {
    let mut messages: Vec<Msg> = vec![Msg {
        role: Role::Assistant,
        content: "Olá! Sou sua assistente financeira. Como posso ajudar você hoje?".to_string(),
    }];

    let mut input = String::new();
    let mut show_help = true;

    let mut log = ChatLog::open_today()?;
    log.append("system", "session_start")?;

    loop {
        terminal.draw(|f| {
            let size = f.area();
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(4),
                    Constraint::Min(5),
                    Constraint::Length(3),
                ])
                .split(size);

            let splash = Paragraph::new(Text::from(vec![
                Line::from(Span::styled(
                    "Centavo",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    ">_ assistente financeiro",
                    Style::default().fg(Color::Cyan),
                )),
                Line::from(Span::styled(
                    "Enter envia, Esc sai, ? mostra os tópicos",
                    Style::default().fg(Color::Gray),
                )),
            ]))
            .alignment(ratatui::layout::Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
            f.render_widget(splash, chunks[0]);

            let mut lines: Vec<Line> = Vec::new();
            if show_help {
                lines.push(Line::from(Span::styled(
                    "Pergunte sobre: saldo, gastos, receitas, sonhos, economia",
                    Style::default().fg(Color::Gray),
                )));
                lines.push(Line::raw(""));
            }

            for m in &messages {
                let (tag, color) = match m.role {
                    Role::User => ("você", Color::Cyan),
                    Role::Assistant => ("centavo", Color::Green),
                };
                lines.push(Line::from(vec![
                    Span::styled(format!("{tag}: "), Style::default().fg(color)),
                    Span::raw(m.content.clone()),
                ]));
                lines.push(Line::raw(""));
            }

            let history = Paragraph::new(Text::from(lines))
                .block(Block::default().borders(Borders::ALL).title("conversa"))
                .wrap(Wrap { trim: false });
            f.render_widget(history, chunks[1]);

            let input_widget = Paragraph::new(input.as_str())
                .block(Block::default().borders(Borders::ALL).title("mensagem"))
                .style(Style::default().fg(Color::White));
            f.render_widget(input_widget, chunks[2]);
        })?;

        if event::poll(std::time::Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Esc => break,
                    KeyCode::Char('?') if input.is_empty() => {
                        show_help = !show_help;
                    }
                    KeyCode::Enter => {
                        let question = input.trim().to_string();
                        if !question.is_empty() {
                            log.append("user", &question)?;
                            messages.push(Msg {
                                role: Role::User,
                                content: question.clone(),
                            });

                            let reply =
                                assistant::answer(snapshot, &config.rule_config(), &question);
                            log.append("assistant", &reply)?;
                            messages.push(Msg {
                                role: Role::Assistant,
                                content: reply,
                            });
                        }
                        input.clear();
                    }
                    KeyCode::Backspace => {
                        input.pop();
                    }
                    KeyCode::Char(c) => {
                        input.push(c);
                    }
                    _ => {}
                }
            }
        }
    }

    Ok(())
}
