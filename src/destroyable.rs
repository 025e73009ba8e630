// trait for components holding subscriptions or scheduled tasks that keep Rc cycles alive; destroy breaks the chain
pub trait Destroyable {
    fn destroy(&mut self);
}
