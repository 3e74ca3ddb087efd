use reminder_notifier::config::DisplayConfig;
use reminder_notifier::control::ControlMessage;
use reminder_notifier::dispatch::Dispatcher;
use reminder_notifier::schedule::{DEFAULT_FIRE_WINDOW_MS, SchedulerEngine};
use reminder_notifier::system::{MockHostControl, MockNotificationDisplay};

/// Full inbound path: JSON line from the foreground app, decoded and applied
/// to the engine, records dispatched with the fixed outbound parameters.
#[test]
fn sync_json_line_flows_through_to_display_parameters() {
    let now: i64 = 1_700_000_000_000;
    let line = format!(
        r#"{{"type":"syncNotifications","notifications":[
            {{"key":"todo-9-alert","todoId":"todo-9","title":"Standup","body":"Daily standup","alertTime":{now}}}
        ]}}"#
    );

    let mut engine = SchedulerEngine::new(
        Dispatcher::new(MockNotificationDisplay::new(), DisplayConfig::default()),
        MockHostControl::new(),
        DEFAULT_FIRE_WINDOW_MS,
    );

    engine.apply_message(ControlMessage::from_json_line(&line).unwrap());
    engine.run_tick(now);

    let shown = engine.dispatcher().display().shown_requests();
    assert_eq!(shown.len(), 1);

    let request = &shown[0];
    assert_eq!(request.title, "Standup");
    assert_eq!(request.body, "Daily standup");
    assert_eq!(request.icon, "./icon-192.png");
    assert_eq!(request.badge, "./icon-192.png");
    assert_eq!(request.vibration, vec![300, 150, 300, 150, 400]);
    assert_eq!(request.tag, "todo-9-alert");
    assert!(request.require_interaction);
    assert_eq!(request.actions.len(), 2);
    assert_eq!(request.actions[0].action, "confirm");
    assert_eq!(request.actions[1].action, "dismiss");
    assert_eq!(request.todo_id, "todo-9");
}

#[test]
fn stop_and_activate_lines_round_trip() {
    let stop = ControlMessage::from_json_line(r#"{"type":"stopNotifications"}"#).unwrap();
    assert_eq!(stop, ControlMessage::StopNotifications);
    assert_eq!(
        serde_json::to_string(&stop).unwrap(),
        r#"{"type":"stopNotifications"}"#
    );

    let activate = ControlMessage::from_json_line(r#"{"type":"activateImmediately"}"#).unwrap();
    assert_eq!(activate, ControlMessage::ActivateImmediately);
}

#[test]
fn unknown_message_types_are_rejected_not_misapplied() {
    for line in [
        r#"{"type":"SKIP_WAITING"}"#,
        r#"{"type":"syncnotifications"}"#,
        r#"{"notifications":[]}"#,
    ] {
        assert!(
            ControlMessage::from_json_line(line).is_err(),
            "line should be rejected: {line}"
        );
    }
}
