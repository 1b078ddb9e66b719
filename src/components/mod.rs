mod ui;

pub(crate) use ui::{Alert, AlertKind, Button, Spinner};
