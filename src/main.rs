use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use iced::widget::canvas::Cache;
use iced::widget::{button, canvas as canvas_widget, column, container, pick_list, row, text};
use iced::{
    executor, keyboard, Application, Color, Command, Element, Event, Length, Settings,
    Subscription, Theme,
};

use ct_wiring_trainer::wiring::RESET_NOTICE;
use ct_wiring_trainer::{
    classify, Classification, Severity, Terminal, TerminalEvent, ThemeChoice, TrainerConfig,
    TrainerVariant, WiringState,
};

mod canvas;

use canvas::WiringCanvas;

#[derive(Parser, Debug)]
#[clap(name = "ct-wiring-trainer", version, about = "CT → 1-phase meter wiring trainer")]
struct Cli {
    #[clap(subcommand)]
    command: Option<Commands>,

    #[clap(long, short, help = "Configuration file (defaults to ct-trainer.toml if present)")]
    config: Option<PathBuf>,

    #[clap(long, help = "Front end to open: select or click")]
    variant: Option<TrainerVariant>,

    #[clap(long, help = "Colour theme: dark or light")]
    theme: Option<ThemeChoice>,

    #[clap(long, short, help = "Log level (error, warn, info, debug, trace)")]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify a wiring without opening a window
    Check {
        #[clap(long, help = "Source wired to M1 (S1, S2 or NC)")]
        m1: Terminal,

        #[clap(long, help = "Source wired to L1 (S1, S2 or NC)")]
        l1: Terminal,
    },
}

pub fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = TrainerConfig::load(cli.config.as_deref())?.with_overrides(
        cli.variant,
        cli.theme,
        cli.log_level.as_deref(),
    )?;

    env_logger::Builder::new()
        .filter_level(config.log_level_filter()?)
        .parse_default_env()
        .init();
    log::debug!("effective config: {config:?}");

    if let Some(Commands::Check { m1, l1 }) = cli.command {
        let result = classify(m1, l1)?;
        println!("{result}");
        if let Some(hint) = result.hint() {
            println!("{hint}");
        }
        return Ok(());
    }

    let mut settings = Settings::with_flags(config.clone());
    settings.window.size = (config.window.width, config.window.height);
    log::info!("starting {} trainer", config.variant);
    WiringTrainer::run(settings)?;
    Ok(())
}

struct WiringTrainer {
    variant: TrainerVariant,
    theme: ThemeChoice,
    wiring: WiringState,
    /// Guidance line under the canvas; the flag marks it as an advisory.
    status_line: Option<(String, bool)>,
    last_check: Option<Classification>,

    canvas_cache: Cache,
}

#[derive(Debug, Clone)]
pub enum Message {
    VariantChosen(TrainerVariant),
    MeterSourceChosen(Terminal, Terminal),
    TerminalClicked(Terminal),
    CheckWiring,
    Reset,
    KeyPressed(keyboard::KeyCode),
    Ignore,
}

impl WiringTrainer {
    fn start_session(&mut self) {
        self.wiring = self.wiring.reset();
        self.status_line = None;
        self.last_check = None;
        self.canvas_cache.clear();
    }

    fn check(&mut self) {
        let result = self.wiring.classify();
        log::info!("check: {result}");
        self.last_check = Some(result);
    }

    fn reset(&mut self) {
        self.start_session();
        if self.variant == TrainerVariant::Click {
            self.status_line = Some((RESET_NOTICE.to_string(), false));
        }
    }
}

impl Application for WiringTrainer {
    type Executor = executor::Default;
    type Message = Message;
    type Flags = TrainerConfig;
    type Theme = Theme;

    fn new(flags: Self::Flags) -> (Self, Command<Self::Message>) {
        (
            Self {
                variant: flags.variant,
                theme: flags.theme,
                wiring: WiringState::default(),
                status_line: None,
                last_check: None,
                canvas_cache: Cache::default(),
            },
            Command::none(),
        )
    }

    fn title(&self) -> String {
        "CT Wiring Trainer".into()
    }

    fn theme(&self) -> Self::Theme {
        match self.theme {
            ThemeChoice::Dark => Theme::Dark,
            ThemeChoice::Light => Theme::Light,
        }
    }

    fn update(&mut self, message: Self::Message) -> Command<Self::Message> {
        match message {
            Message::VariantChosen(variant) => {
                if variant != self.variant {
                    log::info!("switching to {variant} trainer");
                    self.variant = variant;
                    self.start_session();
                }
            }
            Message::MeterSourceChosen(meter, source) => {
                match self.wiring.select_direct(meter, source) {
                    Ok(next) => self.wiring = next,
                    Err(err) => log::warn!("ignored selection: {err}"),
                }
                // A new selection invalidates the previous verdict
                self.last_check = None;
            }
            Message::TerminalClicked(terminal) => match TerminalEvent::new(terminal) {
                Ok(event) => {
                    let (next, outcome) = self.wiring.handle_click(event);
                    self.wiring = next;
                    self.status_line = Some((outcome.to_string(), outcome.is_advisory()));
                    self.canvas_cache.clear();
                }
                Err(err) => log::warn!("ignored click: {err}"),
            },
            Message::CheckWiring => self.check(),
            Message::Reset => self.reset(),
            Message::KeyPressed(key) => match key {
                keyboard::KeyCode::R => self.reset(),
                keyboard::KeyCode::Enter => self.check(),
                _ => {}
            },
            Message::Ignore => {}
        }
        Command::none()
    }

    fn view(&self) -> Element<Message> {
        let header = row![
            text("🔌 CT → 1-Phase Meter Wiring Trainer").size(24).width(Length::Fill),
            pick_list(
                TrainerVariant::ALL.to_vec(),
                Some(self.variant),
                Message::VariantChosen
            )
            .width(Length::Fixed(110.0)),
        ]
        .spacing(10);

        let intro = column![
            text("Connect the CT secondary (S1, S2) to the single phase meter (M1, L1).").size(14),
            text("Correct wiring: S1 → M1 and S2 → L1").size(14),
            text("Reverse polarity: S2 → M1 and S1 → L1").size(14),
        ]
        .spacing(4);

        let body: Element<Message> = match self.variant {
            TrainerVariant::Select => self.select_view(),
            TrainerVariant::Click => self.click_view(),
        };

        let verdict: Element<Message> = match self.last_check {
            Some(result) => {
                let mut lines = column![text(result.message()).size(16).style(severity_color(result.severity()))]
                    .spacing(4);
                if let Some(hint) = result.hint() {
                    lines = lines.push(text(hint).size(14));
                }
                lines.into()
            }
            None => text("Change connections and click Check Wiring to learn different cases.")
                .size(14)
                .into(),
        };

        let content = column![header, intro, body, verdict].spacing(16);

        container(content)
            .padding(20)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        iced::subscription::events().map(|event| match event {
            Event::Keyboard(keyboard::Event::KeyPressed { key_code, .. }) => {
                Message::KeyPressed(key_code)
            }
            _ => Message::Ignore,
        })
    }
}

impl WiringTrainer {
    fn select_view(&self) -> Element<Message> {
        let connections = self.wiring.connections();
        let selector = |meter: Terminal| {
            column![
                text(format!("Meter terminal {meter} connected to:")),
                pick_list(
                    Terminal::SOURCES.to_vec(),
                    connections.source_of(meter),
                    move |source| Message::MeterSourceChosen(meter, source)
                )
                .width(Length::Fill),
            ]
            .spacing(6)
            .width(Length::Fill)
        };

        column![
            text("Select Wiring").size(20),
            row![selector(Terminal::M1), selector(Terminal::L1)].spacing(20),
            button(text("Check Wiring")).on_press(Message::CheckWiring),
        ]
        .spacing(12)
        .into()
    }

    fn click_view(&self) -> Element<Message> {
        let canvas_layer = canvas_widget::Canvas::new(WiringCanvas {
            connections: self.wiring.connections(),
            pending: self.wiring.pending(),
            cache: &self.canvas_cache,
        })
        .width(Length::Fill)
        .height(Length::Fixed(260.0));

        let status = match &self.status_line {
            Some((line, true)) => text(line).size(14).style(severity_color(Severity::Error)),
            Some((line, false)) => text(line).size(14),
            None => text("Click a terminal, then another terminal to draw a wire.").size(14),
        };

        let controls = row![
            button(text("Check Wiring")).on_press(Message::CheckWiring),
            button(text("Reset")).on_press(Message::Reset),
        ]
        .spacing(10);

        column![canvas_layer, status, controls].spacing(10).into()
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Success => Color::from_rgb(0.1, 0.6, 0.2),
        Severity::Warning => Color::from_rgb(0.95, 0.6, 0.1),
        Severity::Error => Color::from_rgb(0.85, 0.15, 0.15),
    }
}
