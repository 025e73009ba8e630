use log::{trace, warn};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::{Duration, SystemTime};

use crate::clock::Clock;
use crate::destroyable::Destroyable;
use crate::events::{Continue, EventEmitter, EventObserver, Scheduler, TaskHandle, Unsubscriber};
use crate::game::evaluator::evaluate_guess;
use crate::game::scoring::compute_score;
use crate::game::word_list::WordList;
use crate::model::{
    GameEngineCommand, GameEngineEvent, GameState, GameSummary, KeyboardHints, Statistics, Tile,
    MAX_ATTEMPTS, WORD_LENGTH,
};
use crate::persistence::SaveManager;

const TICK_INTERVAL: Duration = Duration::from_secs(1);
const SHAKE_CLEAR_DELAY: Duration = Duration::from_millis(500);

/// Central orchestrator. Consumes `GameEngineCommand`s, owns the only
/// mutable copy of the game, and broadcasts snapshots after every accepted
/// mutation. Collaborators never reach back into the engine from inside an
/// event callback; everything they need rides on the event itself.
pub struct GameEngine {
    state: GameState,
    statistics: Statistics,
    hints: KeyboardHints,
    shake_row: Option<usize>,
    /// Wall-clock origin of the running game, shifted backwards on resume
    /// so elapsed time carries across sessions. `None` once the game ends.
    started_at: Option<SystemTime>,
    timer_task: Option<TaskHandle>,
    seed_context: Option<u64>,
    word_list: Rc<WordList>,
    clock: Rc<dyn Clock>,
    scheduler: Scheduler,
    saves: SaveManager,
    weak_self: Weak<RefCell<GameEngine>>,
    subscription_id: Option<Unsubscriber<GameEngineCommand>>,
    game_engine_event_emitter: EventEmitter<GameEngineEvent>,
}

impl Destroyable for GameEngine {
    fn destroy(&mut self) {
        // ticks never write; the latest second is flushed here instead
        if self.state.is_playing() && self.started_at.is_some() {
            self.state.set_time_taken(self.elapsed_seconds());
            self.save();
        }
        self.stop_timer();
        if let Some(subscription_id) = self.subscription_id.take() {
            subscription_id.unsubscribe();
        }
    }
}

impl GameEngine {
    pub fn new(
        game_engine_command_observer: EventObserver<GameEngineCommand>,
        game_engine_event_emitter: EventEmitter<GameEngineEvent>,
        word_list: Rc<WordList>,
        saves: SaveManager,
        clock: Rc<dyn Clock>,
        scheduler: Scheduler,
        seed_context: Option<u64>,
    ) -> Rc<RefCell<Self>> {
        // A throwaway board keeps every accessor coherent before
        // `Initialize` swaps in the real game.
        let placeholder = word_list.random_word();
        let engine = Self {
            state: GameState::new(&placeholder),
            statistics: Statistics::default(),
            hints: KeyboardHints::default(),
            shake_row: None,
            started_at: None,
            timer_task: None,
            seed_context,
            word_list,
            clock,
            scheduler,
            saves,
            weak_self: Weak::new(),
            subscription_id: None,
            game_engine_event_emitter,
        };
        let refcell = Rc::new(RefCell::new(engine));
        refcell.borrow_mut().weak_self = Rc::downgrade(&refcell);
        GameEngine::wire_subscription(refcell.clone(), game_engine_command_observer);
        refcell
    }

    fn wire_subscription(
        engine: Rc<RefCell<Self>>,
        game_engine_command_observer: EventObserver<GameEngineCommand>,
    ) {
        let engine_handler = engine.clone();
        let subscription_id = game_engine_command_observer.subscribe(move |command| {
            let mut engine = engine_handler.borrow_mut();
            engine.handle_command(command.clone());
        });
        engine.borrow_mut().subscription_id = Some(subscription_id);
    }

    /// Session seed for competitive play, taken from `WORDLET_SEED`.
    /// Unset or unparseable values mean a normal session.
    pub fn seed_from_env() -> Option<u64> {
        std::env::var("WORDLET_SEED")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
    }

    pub fn state(&self) -> GameState {
        self.state.clone()
    }

    pub fn statistics(&self) -> Statistics {
        self.statistics.clone()
    }

    pub fn hints(&self) -> KeyboardHints {
        self.hints.clone()
    }

    pub fn shake_row(&self) -> Option<usize> {
        self.shake_row
    }

    fn handle_command(&mut self, command: GameEngineCommand) {
        trace!(target: "game_engine", "Handling command: {:?}", command);
        match command {
            GameEngineCommand::Initialize => self.initialize(),
            GameEngineCommand::NewGame(forced_solution) => self.new_game(forced_solution),
            GameEngineCommand::AppendCharacter(letter) => self.append_character(letter),
            GameEngineCommand::DeleteCharacter => self.delete_character(),
            GameEngineCommand::SubmitGuess => self.submit_guess(),
        }
    }

    fn initialize(&mut self) {
        if let Some(statistics) = self.saves.load_statistics() {
            self.statistics = statistics;
        }
        if self.seed_context.is_some() {
            // seeded sessions race on a fresh board, never a resumed one
            self.new_game(None);
        } else if let Some(state) = self.saves.load_state() {
            self.restore(state);
        } else {
            self.new_game(None);
        }
        self.emit_statistics();
    }

    fn new_game(&mut self, forced_solution: Option<String>) {
        let forced_solution = forced_solution.and_then(|word| {
            let normalized = GameState::normalize_solution(&word);
            if normalized.is_none() {
                warn!(target: "game_engine", "Ignoring unplayable solution {:?}", word);
            }
            normalized
        });
        let solution = forced_solution
            .or_else(|| {
                self.seed_context
                    .map(|seed| self.word_list.word_for_seed(seed))
            })
            .unwrap_or_else(|| self.word_list.random_word());

        self.stop_timer();
        self.clear_shake();
        self.state = GameState::new(&solution);
        self.hints = KeyboardHints::default();
        self.started_at = Some(self.clock.now());
        trace!(target: "game_engine", "New game {:?}", self.state.game_id);
        self.start_timer();
        self.save();
        self.emit_board();
        self.emit_hints();
    }

    fn restore(&mut self, state: GameState) {
        trace!(target: "game_engine", "Resuming saved game {:?}", state.game_id);
        self.stop_timer();
        self.clear_shake();
        self.state = state;
        self.hints = KeyboardHints::from_rows(self.state.submitted_rows());
        if self.state.is_playing() {
            let already_played = Duration::from_secs(self.state.time_taken);
            self.started_at = Some(
                self.clock
                    .now()
                    .checked_sub(already_played)
                    .unwrap_or_else(|| self.clock.now()),
            );
            self.start_timer();
        } else {
            // finished games come back for display only
            self.started_at = None;
        }
        self.emit_board();
        self.emit_hints();
    }

    fn append_character(&mut self, letter: char) {
        if !self.state.is_playing() {
            return;
        }
        let letter = letter.to_ascii_uppercase();
        if !letter.is_ascii_uppercase() {
            return;
        }
        if self.state.push_char(letter) {
            self.save();
            self.emit_board();
        }
    }

    fn delete_character(&mut self) {
        if !self.state.is_playing() {
            return;
        }
        if self.state.pop_char() {
            self.save();
            self.emit_board();
        }
    }

    fn submit_guess(&mut self) {
        if !self.state.is_playing()
            || self.state.current_guess.len() != WORD_LENGTH
            || !self.word_list.is_valid_guess(&self.state.current_guess)
        {
            self.trigger_shake();
            return;
        }

        let guess = self.state.current_guess.clone();
        let statuses = evaluate_guess(&guess, &self.state.solution);
        let tiles: Vec<Tile> = guess
            .chars()
            .zip(statuses)
            .map(|(letter, status)| Tile::new(letter, status))
            .collect();
        self.state.commit_row(tiles);
        self.hints = KeyboardHints::from_rows(self.state.submitted_rows());

        if guess == self.state.solution {
            self.finish_game(true);
        } else if self.state.row_index == MAX_ATTEMPTS {
            self.finish_game(false);
        } else {
            self.save();
            self.emit_board();
            self.emit_hints();
        }
    }

    /// Terminal transition shared by the win and loss paths. Time is frozen
    /// from the wall clock before scoring so the score sees the final value.
    fn finish_game(&mut self, won: bool) {
        self.state.set_time_taken(self.elapsed_seconds());
        self.stop_timer();
        if won {
            let score = compute_score(&self.state);
            self.state.mark_won(score);
        } else {
            self.state.mark_lost();
        }
        self.statistics
            .record_result(won, self.state.row_index, self.clock.now());
        self.save();
        self.emit_board();
        self.emit_hints();
        self.emit_statistics();
        self.game_engine_event_emitter
            .emit(GameEngineEvent::GameCompleted(GameSummary {
                won,
                solution: self.state.solution.clone(),
                score: self.state.score,
                time_taken: self.state.time_taken,
                guesses_used: self.state.row_index,
            }));
    }

    fn trigger_shake(&mut self) {
        let row = self.state.row_index;
        trace!(target: "game_engine", "Rejecting submission at row {}", row);
        self.shake_row = Some(row);
        self.game_engine_event_emitter
            .emit(GameEngineEvent::RowShakeChanged(Some(row)));

        // The clear is not cancelled by a newer shake; both clears write the
        // same None and the second one finds nothing to take.
        let weak_self = self.weak_self.clone();
        let _ = self.scheduler.schedule_once(SHAKE_CLEAR_DELAY, move || {
            if let Some(engine) = weak_self.upgrade() {
                engine.borrow_mut().clear_shake();
            }
        });
    }

    fn clear_shake(&mut self) {
        if self.shake_row.take().is_some() {
            self.game_engine_event_emitter
                .emit(GameEngineEvent::RowShakeChanged(None));
        }
    }

    fn start_timer(&mut self) {
        if self.timer_task.is_some() {
            return;
        }
        let weak_self = self.weak_self.clone();
        let task = self
            .scheduler
            .schedule_repeating(TICK_INTERVAL, move || match weak_self.upgrade() {
                Some(engine) => engine.borrow_mut().handle_tick(),
                None => Continue(false),
            });
        self.timer_task = Some(task);
    }

    fn stop_timer(&mut self) {
        if let Some(task) = self.timer_task.take() {
            task.cancel();
        }
    }

    fn handle_tick(&mut self) -> Continue {
        if !self.state.is_playing() {
            // a tick already queued when the game ended
            return Continue(false);
        }
        let elapsed = self.elapsed_seconds();
        if elapsed > self.state.time_taken {
            self.state.set_time_taken(elapsed);
            self.game_engine_event_emitter
                .emit(GameEngineEvent::TimeTakenChanged(elapsed));
        }
        Continue(true)
    }

    fn elapsed_seconds(&self) -> u64 {
        match self.started_at {
            Some(started_at) => self
                .clock
                .now()
                .duration_since(started_at)
                .unwrap_or_default()
                .as_secs(),
            None => self.state.time_taken,
        }
    }

    fn save(&self) {
        self.saves.save(&self.state, &self.statistics);
    }

    fn emit_board(&self) {
        self.game_engine_event_emitter
            .emit(GameEngineEvent::BoardUpdated(self.state.clone()));
    }

    fn emit_hints(&self) {
        self.game_engine_event_emitter
            .emit(GameEngineEvent::HintsUpdated(self.hints.clone()));
    }

    fn emit_statistics(&self) {
        self.game_engine_event_emitter
            .emit(GameEngineEvent::StatisticsUpdated(self.statistics.clone()));
    }
}
