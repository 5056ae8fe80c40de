use iced::widget::canvas::{self, Cache, Cursor, Event, Frame, Geometry, Path, Stroke, Text};
use iced::{mouse, Color, Font, Point, Rectangle, Size};

use ct_wiring_trainer::{ConnectionState, Side, Terminal};

const LABEL_FONT: Font = Font::Default;

const TERMINAL_RADIUS: f32 = 15.0;
const HIT_RADIUS: f32 = 22.0;

// --- Layout: CT on the left, meter on the right ---

fn terminal_position(terminal: Terminal, size: Size) -> Option<Point> {
    let (fx, fy) = match terminal {
        Terminal::S1 => (0.25, 0.3),
        Terminal::S2 => (0.25, 0.7),
        Terminal::M1 => (0.75, 0.3),
        Terminal::L1 => (0.75, 0.7),
        Terminal::NotConnected => return None,
    };
    Some(Point::new(size.width * fx, size.height * fy))
}

/// Terminal whose target contains `point`, if any.
pub fn hit_terminal(point: Point, size: Size) -> Option<Terminal> {
    Terminal::CT
        .into_iter()
        .chain(Terminal::METER)
        .find(|&t| {
            terminal_position(t, size)
                .map(|center| (point.x - center.x).hypot(point.y - center.y) <= HIT_RADIUS)
                .unwrap_or(false)
        })
}

pub struct WiringCanvas<'a> {
    pub connections: &'a ConnectionState,
    pub pending: Option<Terminal>,
    pub cache: &'a Cache,
}

impl<'a> canvas::Program<crate::Message> for WiringCanvas<'a> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<Geometry> {
        let size = bounds.size();
        let geometry = self.cache.draw(size, |frame| {
            frame.fill_rectangle(Point::ORIGIN, size, Color::from_rgb(0.95, 0.95, 0.95));

            draw_group_caption(frame, "CT secondary", Point::new(size.width * 0.25, size.height * 0.1));
            draw_group_caption(frame, "Meter", Point::new(size.width * 0.75, size.height * 0.1));

            // Wires first so the terminals sit on top of them
            let wire = Stroke::default()
                .with_width(2.0)
                .with_color(Color::from_rgb(0.1, 0.1, 0.1));
            for (ct, meter) in self.connections.wires() {
                if let (Some(p1), Some(p2)) = (terminal_position(ct, size), terminal_position(meter, size)) {
                    frame.stroke(&Path::line(p1, p2), wire.clone());
                }
            }

            for terminal in Terminal::CT.into_iter().chain(Terminal::METER) {
                draw_terminal(frame, terminal, size, self.pending == Some(terminal));
            }
        });
        vec![geometry]
    }

    fn update(
        &self,
        _state: &mut Self::State,
        event: Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> (canvas::event::Status, Option<crate::Message>) {
        if let Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) = event {
            if let Some(position) = cursor.position_in(&bounds) {
                if let Some(terminal) = hit_terminal(position, bounds.size()) {
                    return (
                        canvas::event::Status::Captured,
                        Some(crate::Message::TerminalClicked(terminal)),
                    );
                }
            }
        }
        (canvas::event::Status::Ignored, None)
    }
}

fn draw_terminal(frame: &mut Frame, terminal: Terminal, size: Size, selected: bool) {
    let Some(center) = terminal_position(terminal, size) else {
        return;
    };

    let fill = match terminal.side() {
        Some(Side::Ct) => Color::from_rgb8(0xe0, 0xf7, 0xfa),
        _ => Color::from_rgb8(0xe8, 0xf5, 0xe9),
    };
    let (outline, width) = if selected {
        (Color::from_rgb(1.0, 0.0, 0.0), 2.0)
    } else {
        (Color::BLACK, 1.0)
    };

    let circle = Path::circle(center, TERMINAL_RADIUS);
    frame.fill(&circle, fill);
    frame.stroke(&circle, Stroke::default().with_width(width).with_color(outline));

    frame.fill_text(Text {
        content: terminal.label().to_string(),
        position: center,
        size: 14.0,
        color: Color::BLACK,
        font: LABEL_FONT,
        horizontal_alignment: iced::alignment::Horizontal::Center,
        vertical_alignment: iced::alignment::Vertical::Center,
        ..Text::default()
    });
}

fn draw_group_caption(frame: &mut Frame, caption: &str, position: Point) {
    frame.fill_text(Text {
        content: caption.to_string(),
        position,
        size: 16.0,
        color: Color::from_rgb(0.2, 0.2, 0.2),
        font: LABEL_FONT,
        horizontal_alignment: iced::alignment::Horizontal::Center,
        vertical_alignment: iced::alignment::Vertical::Center,
        ..Text::default()
    });
}
