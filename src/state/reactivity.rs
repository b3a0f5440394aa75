// ============================================================================
// REACTIVITY - Sistema de notificaciones/subscribers para reactividad
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

type Callback<T> = Rc<dyn Fn(&T)>;

/// Valor compartido con subscribers. Los clones comparten valor y
/// subscribers, así que un renderer puede suscribirse sobre su propia copia.
pub struct Reactive<T> {
    value: Rc<RefCell<T>>,
    subscribers: Rc<RefCell<Vec<Callback<T>>>>,
}

impl<T> Clone for Reactive<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            subscribers: self.subscribers.clone(),
        }
    }
}

impl<T: Clone + 'static> Reactive<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Establecer nuevo valor y notificar subscribers
    pub fn set(&self, new_value: T) {
        *self.value.borrow_mut() = new_value;
        self.notify();
    }

    pub fn update<F>(&self, updater: F)
    where
        F: FnOnce(&mut T),
    {
        updater(&mut *self.value.borrow_mut());
        self.notify();
    }

    /// Suscribirse a cambios; el callback recibe el valor nuevo
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&T) + 'static,
    {
        self.subscribers.borrow_mut().push(Rc::new(callback));
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    fn notify(&self) {
        // Copia de la lista: un callback puede suscribir o leer el valor
        let callbacks: Vec<Callback<T>> = self.subscribers.borrow().clone();
        let value = self.get();
        for callback in callbacks {
            callback(&value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn set_notifies_with_new_value() {
        let state = Reactive::new(None::<i64>);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        state.subscribe(move |v| sink.borrow_mut().push(*v));

        state.set(Some(3));
        state.update(|v| *v = None);

        assert_eq!(*seen.borrow(), vec![Some(3), None]);
        assert_eq!(state.get(), None);
    }

    #[test]
    fn clones_share_value_and_subscribers() {
        let state = Reactive::new(0);
        let copy = state.clone();
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        copy.subscribe(move |_| counter.set(counter.get() + 1));

        state.set(5);

        assert_eq!(copy.get(), 5);
        assert_eq!(hits.get(), 1);
        assert_eq!(state.subscriber_count(), 1);
    }

    #[test]
    fn callback_may_read_and_subscribe_during_notify() {
        let state = Reactive::new(1);
        let inner = state.clone();
        state.subscribe(move |_| {
            let _ = inner.get();
            inner.subscribe(|_| {});
        });

        state.set(2);

        assert_eq!(state.subscriber_count(), 2);
    }
}
