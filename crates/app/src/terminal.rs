use std::io::{self, BufRead, Write};

use quiz_core::assets::AssetResolver;
use quiz_core::engine::{IgnoredReason, Transition};
use quiz_core::model::Section;
use services::{LearningBrowser, QuizService, QuizServiceError, QuizSession, ScoreBoard};
use thiserror::Error;
use ui::{
    LearningVm, MenuCardVm, OptionState, QuestionVm, ReviewVm, SummaryVm, map_learning, map_menu,
    map_question, map_review, map_summary,
};

#[derive(Debug, Error)]
pub enum HostError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Service(#[from] QuizServiceError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// One line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// 0-based option or menu entry.
    Pick(usize),
    Submit,
    Next,
    Previous,
    Restart,
    Menu,
    Quit,
}

impl Input {
    /// Parse a line; numbers are 1-based on screen.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        match line.to_ascii_lowercase().as_str() {
            "s" => Some(Self::Submit),
            "n" => Some(Self::Next),
            "p" => Some(Self::Previous),
            "r" => Some(Self::Restart),
            "m" => Some(Self::Menu),
            "q" => Some(Self::Quit),
            _ => match line.parse::<usize>() {
                Ok(n) if n > 0 => Some(Self::Pick(n - 1)),
                _ => None,
            },
        }
    }
}

enum Outcome {
    Menu,
    Quit,
}

const QUIZ_HINT: &str = "Enter an option number, s to submit, n for next, p for previous, r to restart, m for menu, q to quit.";
const LEARN_HINT: &str = "Enter a section number, n for next, p for previous, q to quit.";

/// Line-oriented host for the quiz and learning screens.
pub struct Terminal<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Run quizzes until the user quits; `start` skips the first menu.
    pub fn play(
        &mut self,
        service: &QuizService,
        board: &ScoreBoard,
        assets: &dyn AssetResolver,
        start: Option<Section>,
        json: bool,
    ) -> Result<(), HostError> {
        let mut next = start;
        loop {
            let section = match next.take() {
                Some(section) => section,
                None => match self.choose_section(board)? {
                    Some(section) => section,
                    None => return Ok(()),
                },
            };

            let mut session = service.start_observed(section, board.observer_for(section))?;
            match self.run_quiz(&mut session, board, assets, json)? {
                Outcome::Menu => continue,
                Outcome::Quit => return Ok(()),
            }
        }
    }

    /// Browse sections without scoring.
    pub fn learn(
        &mut self,
        section: Option<Section>,
        assets: &dyn AssetResolver,
    ) -> Result<(), HostError> {
        let mut browser = LearningBrowser::new(section.unwrap_or(Section::ALL[0]))?;
        loop {
            if let Some(vm) = map_learning(&browser, assets) {
                render_learning(&mut self.out, &vm)?;
            }
            let Some(line) = self.read_line()? else {
                return Ok(());
            };
            match Input::parse(&line) {
                Some(Input::Next) => {
                    if !browser.next() {
                        writeln!(self.out, "Already at the last item.")?;
                    }
                }
                Some(Input::Previous) => {
                    if !browser.previous() {
                        writeln!(self.out, "Already at the first item.")?;
                    }
                }
                Some(Input::Pick(index)) => match Section::ALL.get(index) {
                    Some(section) => browser.select_section(*section)?,
                    None => writeln!(self.out, "{LEARN_HINT}")?,
                },
                Some(Input::Quit | Input::Menu) => return Ok(()),
                _ => writeln!(self.out, "{LEARN_HINT}")?,
            }
        }
    }

    fn choose_section(&mut self, board: &ScoreBoard) -> Result<Option<Section>, HostError> {
        let cards = map_menu();
        loop {
            render_menu(&mut self.out, &cards, board)?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match Input::parse(&line) {
                Some(Input::Pick(index)) if index < cards.len() => {
                    return Ok(Some(cards[index].section));
                }
                Some(Input::Quit) => return Ok(None),
                _ => writeln!(self.out, "Choose a section number or q to quit.")?,
            }
        }
    }

    fn run_quiz(
        &mut self,
        session: &mut QuizSession,
        board: &ScoreBoard,
        assets: &dyn AssetResolver,
        json: bool,
    ) -> Result<Outcome, HostError> {
        let mut reported = false;
        loop {
            if session.engine().is_reviewing() {
                if !reported {
                    self.report(session, json)?;
                    reported = true;
                }
                if let Some(vm) = map_review(session.engine(), assets) {
                    render_review(&mut self.out, &vm)?;
                }
            } else if let Some(vm) = map_question(session, assets) {
                render_question(&mut self.out, &vm)?;
            }

            let Some(line) = self.read_line()? else {
                return Ok(Outcome::Quit);
            };
            let Some(input) = Input::parse(&line) else {
                writeln!(self.out, "{QUIZ_HINT}")?;
                continue;
            };

            let transition = match input {
                Input::Pick(index) => session.pick(index),
                Input::Submit => session.submit(),
                Input::Next if session.engine().is_reviewing() => session.review_next(),
                Input::Next => session.advance(),
                Input::Previous => session.review_previous(),
                Input::Restart => {
                    let transition = session.restart();
                    if transition.is_applied() {
                        reported = false;
                        if let Some(section) = session.engine().section() {
                            board.reset(section);
                        }
                    }
                    transition
                }
                Input::Menu => return Ok(Outcome::Menu),
                Input::Quit => return Ok(Outcome::Quit),
            };

            if let Transition::Ignored(reason) = transition {
                writeln!(self.out, "{}", ignored_hint(reason))?;
            }
        }
    }

    fn report(&mut self, session: &QuizSession, json: bool) -> Result<(), HostError> {
        let Some(summary) = session.summary() else {
            return Ok(());
        };
        if json {
            writeln!(self.out, "{}", serde_json::to_string(&summary)?)?;
        } else {
            render_summary(&mut self.out, &map_summary(&summary))?;
        }
        Ok(())
    }

    /// Next input line, `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        write!(self.out, "> ")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

fn ignored_hint(reason: IgnoredReason) -> &'static str {
    match reason {
        IgnoredReason::WrongPhase => "That isn't available right now.",
        IgnoredReason::NoSelection => "Pick an option first.",
        IgnoredReason::UnknownChoice => "There is no such option.",
    }
}

//
// ─── RENDERING ─────────────────────────────────────────────────────────────────
//

fn render_menu(out: &mut impl Write, cards: &[MenuCardVm], board: &ScoreBoard) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Skull Anatomy Quiz")?;
    for (number, card) in cards.iter().enumerate().map(|(i, card)| (i + 1, card)) {
        writeln!(
            out,
            "  {number}) {} ({}), last score {}",
            card.title,
            card.count_label,
            board.latest(card.section)
        )?;
        writeln!(out, "     {}", card.description)?;
    }
    Ok(())
}

fn render_question(out: &mut impl Write, vm: &QuestionVm) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}  [{}%]", vm.progress_label, vm.progress_percent)?;
    if let Some(image) = &vm.image {
        writeln!(out, "[image: {} ({})]", image.alt, image.source)?;
    }
    if let Some(instruction) = &vm.instruction {
        writeln!(out, "{instruction}")?;
    }
    writeln!(out, "{}", vm.prompt)?;
    for (number, option) in vm.options.iter().enumerate().map(|(i, o)| (i + 1, o)) {
        let marker = match option.state {
            OptionState::Idle | OptionState::Disabled => " ",
            OptionState::Selected => ">",
            OptionState::Correct => "+",
            OptionState::Incorrect => "x",
        };
        writeln!(out, " {marker} {number}) {}", option.label)?;
    }
    if let Some(feedback) = &vm.feedback {
        writeln!(out, "{}", feedback.headline)?;
        writeln!(out, "{}", feedback.explanation)?;
        if let Some(location) = &feedback.location {
            writeln!(out, "Location: {location}")?;
        }
        if let Some(fact) = &feedback.fun_fact {
            writeln!(out, "Fun fact: {fact}")?;
        }
    }
    if let Some(next) = &vm.next_label {
        writeln!(out, "(n) {next}")?;
    } else if vm.can_submit {
        writeln!(out, "(s) Submit Answer")?;
    }
    writeln!(out, "{}", vm.score_label)
}

fn render_review(out: &mut impl Write, vm: &ReviewVm) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}  ({})", vm.title, vm.position_label)?;
    if let Some(image) = &vm.image {
        writeln!(out, "[image: {} ({})]", image.alt, image.source)?;
    }
    writeln!(out, "{}", vm.description)?;
    if let Some(location) = &vm.location {
        writeln!(out, "Location: {location}")?;
    }
    if let Some(fact) = &vm.fun_fact {
        writeln!(out, "Fun fact: {fact}")?;
    }
    let mut actions = Vec::new();
    if vm.previous_enabled {
        actions.push(format!("(p) {}", vm.previous_label));
    }
    if vm.next_enabled {
        actions.push(format!("(n) {}", vm.next_label));
    }
    actions.push(format!("(r) {}", vm.restart_label));
    writeln!(out, "{}", actions.join("  "))
}

fn render_learning(out: &mut impl Write, vm: &LearningVm) -> io::Result<()> {
    writeln!(out)?;
    let tabs: Vec<String> = vm
        .tabs
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            if tab.active {
                format!("[{}) {}]", i + 1, tab.title)
            } else {
                format!(" {}) {} ", i + 1, tab.title)
            }
        })
        .collect();
    writeln!(out, "{}", tabs.join(" "))?;
    writeln!(out, "{}  ({})", vm.name, vm.position_label)?;
    if let Some(image) = &vm.image {
        writeln!(out, "[image: {} ({})]", image.alt, image.source)?;
    }
    writeln!(out, "{}", vm.description)?;
    if let Some(location) = &vm.location {
        writeln!(out, "Location: {location}")?;
    }
    if let Some(fact) = &vm.fun_fact {
        writeln!(out, "Fun fact: {fact}")?;
    }
    Ok(())
}

fn render_summary(out: &mut impl Write, vm: &SummaryVm) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", vm.headline)?;
    writeln!(out, "{}", vm.score_label)?;
    if vm.perfect {
        writeln!(out, "Perfect score!")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use quiz_core::assets::AssetTable;
    use quiz_core::model::QuizSettings;
    use quiz_core::time::fixed_clock;

    use super::*;

    fn run_play(script: &str, start: Option<Section>, json: bool) -> (String, ScoreBoard) {
        let service = QuizService::new(QuizSettings::default().with_seed(3)).with_clock(fixed_clock());
        let board = ScoreBoard::new();
        let mut terminal = Terminal::new(Cursor::new(script.to_string()), Vec::new());
        terminal
            .play(&service, &board, &AssetTable::empty(), start, json)
            .unwrap();
        let out = String::from_utf8(terminal.into_output()).unwrap();
        (out, board)
    }

    /// Options are listed in catalog order, so question k's answer is option k.
    fn perfect_run(questions: usize) -> String {
        (1..=questions).map(|k| format!("{k}\ns\nn\n")).collect()
    }

    #[test]
    fn parses_inputs() {
        assert_eq!(Input::parse(" 3 \n"), Some(Input::Pick(2)));
        assert_eq!(Input::parse("S"), Some(Input::Submit));
        assert_eq!(Input::parse("q"), Some(Input::Quit));
        assert_eq!(Input::parse("0"), None);
        assert_eq!(Input::parse("next"), None);
    }

    #[test]
    fn perfect_run_reports_summary_and_review() {
        let script = format!("{}q\n", perfect_run(6));
        let (out, board) = run_play(&script, Some(Section::Neurocranium), false);

        assert!(out.contains("Question 1 of 6"));
        assert!(out.contains("Correct! Well done!"));
        assert!(out.contains("You scored 6 / 6 (100%)"));
        assert!(out.contains("Perfect score!"));
        assert!(out.contains("Review Mode - Frontal Bone"));
        assert_eq!(board.latest(Section::Neurocranium), 6);
        assert_eq!(board.notifications(), 6);
    }

    #[test]
    fn restart_clears_section_score() {
        let script = format!("{}r\nq\n", perfect_run(3));
        let (out, board) = run_play(&script, Some(Section::Sutures), false);

        assert!(out.contains("You scored 3 / 3 (100%)"));
        assert_eq!(board.latest(Section::Sutures), 0);
        assert_eq!(board.notifications(), 3);
    }

    #[test]
    fn restarted_run_reports_new_score_in_menu() {
        let script = format!("{}r\nm\nq\n", perfect_run(3));
        let (out, _) = run_play(&script, Some(Section::Sutures), false);
        assert!(out.contains("Sutures (3 sutures), last score 0"));
    }

    #[test]
    fn json_mode_prints_summary_line() {
        let script = format!("{}q\n", perfect_run(3));
        let (out, _) = run_play(&script, Some(Section::Sutures), true);

        let line = out
            .lines()
            .map(|line| line.trim_start_matches("> "))
            .find(|line| line.starts_with('{'))
            .expect("json summary");
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["score"], 3);
        assert_eq!(value["total"], 3);
    }

    #[test]
    fn invalid_moves_print_hints() {
        let (out, board) = run_play("s\nn\nhello\nq\n", Some(Section::Sutures), false);
        assert!(out.contains("Pick an option first."));
        assert!(out.contains("That isn't available right now."));
        assert!(out.contains(QUIZ_HINT));
        assert_eq!(board.notifications(), 0);
    }

    #[test]
    fn menu_picks_section_and_returns() {
        let (out, _) = run_play("2\nm\n9\nq\n", None, false);
        assert!(out.contains("1) Neurocranium"));
        assert!(out.contains("Question 1 of 3"));
        assert!(out.contains("Choose a section number or q to quit."));
    }

    #[test]
    fn end_of_input_quits() {
        let (out, _) = run_play("", Some(Section::Viscerocranium), false);
        assert!(out.contains("Question 1 of 4"));
    }

    #[test]
    fn learn_navigates_and_switches_sections() {
        let mut terminal = Terminal::new(Cursor::new("n\np\np\n2\nq\n".to_string()), Vec::new());
        terminal.learn(None, &AssetTable::empty()).unwrap();
        let out = String::from_utf8(terminal.into_output()).unwrap();

        assert!(out.contains("Frontal Bone  (1 / 6)"));
        assert!(out.contains("(2 / 6)"));
        assert!(out.contains("Already at the first item."));
        assert!(out.contains("[2) Sutures]"));
    }
}
