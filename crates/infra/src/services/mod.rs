mod notifier;

pub use notifier::{
    INotifier, LogNotifier, NotificationDeliveryError, SessionNotification, WebhookNotifier,
};
