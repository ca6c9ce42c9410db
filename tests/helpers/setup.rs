use chrono::prelude::*;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};
use tutor_scheduler_domain::{Subject, Tutor};
use tutor_scheduler_infra::{
    INotifier, ISys, NotificationDeliveryError, SchedulerContext, SessionNotification,
};

pub struct StaticTimeSys(pub i64);
impl ISys for StaticTimeSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.0
    }
}

/// Remembers every notification it was asked to deliver
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<SessionNotification>>,
    pub calls: AtomicUsize,
}

impl RecordingNotifier {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl INotifier for RecordingNotifier {
    async fn notify(
        &self,
        notification: &SessionNotification,
    ) -> Result<(), NotificationDeliveryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

pub struct TestApp {
    pub ctx: SchedulerContext,
    pub notifier: Arc<RecordingNotifier>,
    pub tutor: Tutor,
    pub subject: Subject,
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub fn millis(dt: NaiveDateTime) -> i64 {
    Utc.from_utc_datetime(&dt).timestamp_millis()
}

/// In-memory context with a fixed clock, a recording notifier and one
/// tutor teaching one subject
pub async fn spawn_app(now: NaiveDateTime) -> TestApp {
    let mut ctx = SchedulerContext::create_inmemory();
    ctx.config.timezone = chrono_tz::UTC;
    ctx.config.notification_lead_minutes = 60;
    ctx.config.notification_retention_days = 7;
    ctx.sys = Arc::new(StaticTimeSys(millis(now)));
    let notifier = Arc::new(RecordingNotifier::default());
    ctx.notifier = notifier.clone();

    let tutor = Tutor::new("Grace", "grace@example.com");
    let mut subject = Subject::new(tutor.id.clone(), "Compilers");
    subject.recipients = vec![
        "student1@example.com".into(),
        "student2@example.com".into(),
    ];
    ctx.repos.tutors.insert(&tutor).await.unwrap();
    ctx.repos.subjects.insert(&subject).await.unwrap();

    TestApp {
        ctx,
        notifier,
        tutor,
        subject,
    }
}
