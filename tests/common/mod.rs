//! Shared setup for the HTTP-level tests: an in-memory store and a mailer
//! that records instead of sending.

use std::sync::{Arc, Mutex};

use actix_web::web;

use job_portal::config::Settings;
use job_portal::data::database::Store;
use job_portal::state::Portal;
use job_portal::utils::mailer::{Mailer, Notification};

#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

impl Mailer for RecordingMailer {
    fn send(&self, notification: Notification) {
        self.sent.lock().unwrap().push(notification);
    }
}

pub struct TestPortal {
    pub portal: web::Data<Portal>,
    pub mailer: Arc<RecordingMailer>,
}

pub fn test_portal(settings: Settings) -> TestPortal {
    let mailer = Arc::new(RecordingMailer::default());
    let portal = Portal::new(Store::open_in_memory().unwrap(), mailer.clone(), &settings).unwrap();
    TestPortal {
        portal: web::Data::new(portal),
        mailer,
    }
}

#[allow(dead_code)]
pub fn open_portal() -> TestPortal {
    test_portal(Settings::default())
}

#[allow(dead_code)]
pub fn guarded_portal() -> TestPortal {
    test_portal(Settings {
        require_token: true,
        ..Settings::default()
    })
}
