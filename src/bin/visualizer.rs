use iced::{
    button, scrollable, text_input, Alignment as Align, Button, Column, Container, Element, Length, Row,
    Sandbox, Scrollable, Settings, Text, TextInput,
};
use irs_phase_lib::{
    geometry::{ELEMENT_COUNT_FIELD, INCIDENT_ANGLE_FIELD, REFLECTION_ANGLE_FIELD},
    logging,
    series_chart::PhaseChart,
    PhaseError, Session,
};
use plotters_iced::ChartWidget;
use tracing::Level;

const DEFAULT_DESTINATION: &str = "irs_phase";
const HELP: &str = "Enter N (integer), angles in degrees. Click Compute to see phases.";

#[derive(Debug, Clone)]
enum Message {
    ElementCountChanged(String),
    IncidentChanged(String),
    ReflectionChanged(String),
    DestinationChanged(String),
    Compute,
    SavePng,
    SaveCsv,
    Reset,
}

#[derive(Default)]
struct Field {
    state: text_input::State,
    value: String,
}

#[derive(Default)]
struct State {
    session: Session,

    element_count: Field,
    incident: Field,
    reflection: Field,
    destination: Field,

    compute_button: button::State,
    png_button: button::State,
    csv_button: button::State,
    reset_button: button::State,
    results_scroll: scrollable::State,

    lines: Vec<String>,
    chart: PhaseChart,
    status: String,
}

impl State {
    fn destination(&self) -> &str {
        match self.destination.value.trim() {
            "" => DEFAULT_DESTINATION,
            path => path,
        }
    }

    fn compute(&mut self) {
        match self.session.compute(
            &self.element_count.value,
            &self.incident.value,
            &self.reflection.value,
        ) {
            Ok(profile) => {
                self.chart = PhaseChart::new(profile);
            }
            Err(e) => {
                self.status = report("Input Error", &e);
                return;
            }
        }
        self.lines = self.session.display_lines().unwrap_or_default();
        self.status = format!("Computed {} element phases.", self.lines.len());
    }

    fn reset(&mut self) {
        for field in [
            &mut self.element_count,
            &mut self.incident,
            &mut self.reflection,
        ] {
            field.value.clear();
        }
        self.lines.clear();
        self.chart.clear();
        self.session.reset();
        self.status.clear();
    }
}

fn report(title: &str, err: &PhaseError) -> String {
    format!("{}: {}", title, err)
}

fn labeled_input<'a>(
    label: &str,
    field: &'a mut Field,
    on_change: fn(String) -> Message,
) -> Row<'a, Message> {
    Row::new()
        .spacing(8)
        .align_items(Align::Center)
        .push(Text::new(format!("{}:", label)).width(Length::Units(210)))
        .push(
            TextInput::new(&mut field.state, "", &field.value, on_change)
                .padding(6)
                .width(Length::Units(120)),
        )
}

impl Sandbox for State {
    type Message = Message;

    fn new() -> Self {
        State::default()
    }

    fn title(&self) -> String {
        "IRS Phase Shift Visualizer".to_owned()
    }

    fn update(&mut self, message: Message) {
        match message {
            Message::ElementCountChanged(value) => self.element_count.value = value,
            Message::IncidentChanged(value) => self.incident.value = value,
            Message::ReflectionChanged(value) => self.reflection.value = value,
            Message::DestinationChanged(value) => self.destination.value = value,
            Message::Compute => self.compute(),
            Message::SavePng => {
                self.status = match self.session.export_plot(self.destination()) {
                    Ok(path) => format!("Plot saved to: {}", path.display()),
                    Err(e) => report("Save Error", &e),
                }
            }
            Message::SaveCsv => {
                self.status = match self.session.export_csv(self.destination()) {
                    Ok(path) => format!("CSV saved to: {}", path.display()),
                    Err(e) => report("Save Error", &e),
                }
            }
            Message::Reset => self.reset(),
        }
    }

    fn view(&mut self) -> Element<Message> {
        let buttons = Row::new()
            .spacing(8)
            .push(Button::new(&mut self.compute_button, Text::new("Compute")).on_press(Message::Compute))
            .push(Button::new(&mut self.png_button, Text::new("Save PNG")).on_press(Message::SavePng))
            .push(Button::new(&mut self.csv_button, Text::new("Save CSV")).on_press(Message::SaveCsv))
            .push(Button::new(&mut self.reset_button, Text::new("Reset")).on_press(Message::Reset));

        let inputs = Column::new()
            .spacing(8)
            .push(Text::new("Inputs").size(22))
            .push(labeled_input(
                ELEMENT_COUNT_FIELD,
                &mut self.element_count,
                Message::ElementCountChanged,
            ))
            .push(labeled_input(
                INCIDENT_ANGLE_FIELD,
                &mut self.incident,
                Message::IncidentChanged,
            ))
            .push(labeled_input(
                REFLECTION_ANGLE_FIELD,
                &mut self.reflection,
                Message::ReflectionChanged,
            ))
            .push(labeled_input(
                "Save as (path)",
                &mut self.destination,
                Message::DestinationChanged,
            ))
            .push(buttons);

        let results = Column::new()
            .spacing(8)
            .width(Length::Fill)
            .push(Text::new("Results").size(22))
            .push(
                Scrollable::new(&mut self.results_scroll)
                    .height(Length::Units(260))
                    .push(Text::new(self.lines.join("\n")).size(15)),
            );

        let chart = ChartWidget::new(&mut self.chart)
            .width(Length::Fill)
            .height(Length::Fill);

        let content = Column::new()
            .spacing(12)
            .push(Row::new().spacing(24).push(inputs).push(results))
            .push(chart)
            .push(Text::new(self.status.as_str()).size(16))
            .push(Text::new(HELP).size(14));

        Container::new(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(12)
            .into()
    }
}

fn main() -> iced::Result {
    logging::init(Level::INFO);

    State::run(Settings {
        antialiasing: true,
        window: iced::window::Settings {
            size: (900, 760),
            ..iced::window::Settings::default()
        },
        ..Settings::default()
    })
}
