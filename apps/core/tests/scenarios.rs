use sensor_radar_core::chart::{AxisName, ChartCommand, SeriesData};
use sensor_radar_core::{
    ChartModel, Envelope, PlotId, PollError, PollOutcome, RadarSample, Session,
};
use serde_json::json;

fn ready_session() -> (Session, ChartModel) {
    let session = Session::new();
    let mut charts = ChartModel::new();
    session.initialize(&mut charts);
    (session, charts)
}

fn envelope(value: serde_json::Value) -> Envelope {
    Envelope::from_value(value).unwrap()
}

#[test]
fn radar_point_cloud_scenario() {
    let (mut session, mut charts) = ready_session();
    for (angle, distance) in [(45, 30.0), (10, 80.0), (45, 50.0)] {
        session.update_radar(Ok(RadarSample::new(angle, distance)), &mut charts);
    }

    let points = charts.series(PlotId::Radar, 0).unwrap();
    assert_eq!(
        points.data,
        SeriesData::Polar {
            r: vec![80.0, 50.0],
            theta: vec![10.0, 45.0],
        }
    );

    let sweep = charts.series(PlotId::Radar, 1).unwrap();
    assert_eq!(
        sweep.data,
        SeriesData::Polar {
            r: vec![0.0, 100.0],
            theta: vec![45.0, 45.0],
        }
    );
}

#[test]
fn plotted_angles_sorted_for_any_arrival_order() {
    let (mut session, mut charts) = ready_session();
    let angles = [170, 3, 88, 3, 120, 45, 170, 0, 99, 45];
    for (step, angle) in angles.iter().enumerate() {
        let distance = f64::from(u32::try_from(step).unwrap());
        session.update_radar(Ok(RadarSample::new(*angle, distance)), &mut charts);
    }

    let snapshot = session.radar().snapshot();
    assert!(snapshot.angles.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(snapshot.len(), 7);
    assert_eq!(session.radar().distance_at(3), Some(3.0));
    assert_eq!(session.radar().distance_at(170), Some(6.0));
    assert_eq!(session.radar().distance_at(45), Some(9.0));
}

#[test]
fn ir_window_scenario() {
    let (mut session, mut charts) = ready_session();
    for value in 1..=25 {
        session.update_ir(Ok(f64::from(value)), &mut charts);
    }

    let expected: Vec<f64> = (6..=25).map(f64::from).collect();
    assert_eq!(session.ir().to_vec(), expected);
    assert_eq!(charts.axis_range(PlotId::Ir, AxisName::Y), Some([5.0, 26.0]));

    let series = charts.series(PlotId::Ir, 0).unwrap();
    let SeriesData::Cartesian { x, y } = &series.data else {
        panic!("ir series should be cartesian");
    };
    assert_eq!(x.len(), 20);
    assert_eq!(x.first(), Some(&0.0));
    assert_eq!(x.last(), Some(&19.0));
    assert_eq!(y, &expected);
}

#[test]
fn single_reading_produces_no_relayout() {
    let mut session = Session::new();
    let mut commands: Vec<ChartCommand> = Vec::new();
    session.apply(
        &envelope(json!({"ir": 4, "dht": {"temperature": 70, "humidity": 30}})),
        &mut commands,
    );

    assert!(!commands
        .iter()
        .any(|command| matches!(command, ChartCommand::SetAxisRange { .. })));
}

#[test]
fn invalid_sensor_does_not_block_others() {
    let (mut session, mut charts) = ready_session();
    let applied = session.apply(
        &envelope(json!({
            "radar": {"angle": 30},
            "ir": 812,
            "dht": {"temperature": 68.2, "humidity": 51}
        })),
        &mut charts,
    );

    assert!(!applied.radar);
    assert!(applied.ir);
    assert!(applied.dht);
    assert!(session.radar().is_empty());
    assert_eq!(session.ir().to_vec(), vec![812.0]);
    assert_eq!(session.humidity().to_vec(), vec![51.0]);
}

#[test]
fn no_endpoint_means_no_request() {
    let (mut session, _charts) = ready_session();
    let before = session.snapshot();

    assert!(session.begin_poll().is_none());
    assert_eq!(session.snapshot(), before);
    assert_eq!(before.endpoint, None);
}

#[test]
fn server_error_leaves_sensors_unchanged() {
    let (mut session, mut charts) = ready_session();
    session.set_endpoint("10.0.0.7");
    session.apply(
        &envelope(json!({
            "radar": {"angle": 90, "distance": 12},
            "ir": 100,
            "dht": {"temperature": 70, "humidity": 40}
        })),
        &mut charts,
    );
    let state_before = session.snapshot();
    let charts_before = charts.clone();

    let ticket = session.begin_poll().unwrap();
    let outcome = session.complete_poll(&ticket, Err(PollError::Status(500)), &mut charts);

    assert!(matches!(outcome, PollOutcome::Failed(_)));
    assert_eq!(session.snapshot(), state_before);
    assert_eq!(charts, charts_before);

    // The next tick polls again.
    assert!(session.begin_poll().is_some());
}

#[test]
fn decode_failure_is_swallowed() {
    let (mut session, mut charts) = ready_session();
    session.set_endpoint("10.0.0.7");
    let ticket = session.begin_poll().unwrap();
    let result = Envelope::from_slice(b"<html>busy</html>");

    let outcome = session.complete_poll(&ticket, result, &mut charts);
    assert!(matches!(outcome, PollOutcome::Failed(PollError::Decode(_))));
    assert!(session.begin_poll().is_some());
}

#[test]
fn snapshot_serializes_all_series() {
    let (mut session, mut charts) = ready_session();
    session.set_endpoint("radar.local:81");
    session.apply(
        &envelope(json!({
            "radar": {"angle": 15, "distance": 40},
            "ir": 2,
            "dht": {"temperature": 71, "humidity": 39}
        })),
        &mut charts,
    );

    let value = serde_json::to_value(session.snapshot()).unwrap();
    assert_eq!(value["endpoint"], "radar.local:81");
    assert_eq!(value["radar"]["angles"], json!([15.0]));
    assert_eq!(value["sweep"]["theta"], json!([15.0, 15.0]));
    assert_eq!(value["ir"], json!([2.0]));
    assert_eq!(value["temperature"], json!([71.0]));
}
