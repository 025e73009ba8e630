use std::{cell::RefCell, rc::Rc};

use crate::{
    destroyable::Destroyable,
    events::{EventEmitter, EventObserver, Unsubscriber},
    model::{GameEngineCommand, InputEvent, Key},
};

/// Funnels raw input into engine commands. Physical and on-screen
/// keyboards produce the same commands, so the engine never knows which
/// one the player used.
pub struct InputTranslator {
    game_engine_command_emitter: EventEmitter<GameEngineCommand>,
    input_subscription: Option<Unsubscriber<InputEvent>>,
}

impl Destroyable for InputTranslator {
    fn destroy(&mut self) {
        if let Some(subscription) = self.input_subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl InputTranslator {
    pub fn new(
        game_engine_command_emitter: EventEmitter<GameEngineCommand>,
        input_event_observer: EventObserver<InputEvent>,
    ) -> Rc<RefCell<Self>> {
        let input_translator = Rc::new(RefCell::new(Self {
            game_engine_command_emitter,
            input_subscription: None,
        }));

        InputTranslator::bind_input_observer(input_translator.clone(), input_event_observer);

        input_translator
    }

    fn bind_input_observer(
        input_translator: Rc<RefCell<Self>>,
        input_event_observer: EventObserver<InputEvent>,
    ) {
        let subscription = {
            let input_translator = input_translator.clone();
            input_event_observer.subscribe(move |event| {
                input_translator.borrow().handle_input_event(event);
            })
        };

        input_translator.borrow_mut().input_subscription = Some(subscription);
    }

    fn handle_input_event(&self, event: &InputEvent) {
        let key = match event {
            InputEvent::KeyPressed(key) => *key,
            InputEvent::VirtualKeyPressed(key) => *key,
        };
        match key {
            Key::Letter(letter) => self
                .game_engine_command_emitter
                .emit(GameEngineCommand::AppendCharacter(letter)),
            Key::Backspace => self
                .game_engine_command_emitter
                .emit(GameEngineCommand::DeleteCharacter),
            Key::Enter => self
                .game_engine_command_emitter
                .emit(GameEngineCommand::SubmitGuess),
        }
    }
}
