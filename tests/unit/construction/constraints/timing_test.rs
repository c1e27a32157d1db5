use super::*;
use crate::construction::states::RouteState;
use crate::helpers::models::problem::*;
use crate::helpers::models::solution::*;
use crate::models::common::{Schedule, TimeWindow};
use crate::models::problem::VehicleBreak;
use ActivityConstraintStatus::{Fulfilled, NotFulfilled, NotFulfilledBreak};

fn create_timing_module() -> TimingConstraintModule {
    TimingConstraintModule::new(TestActivityCost::new_shared(), TestTransportCost::new_shared())
}

fn create_route_ctx_with_locations(locations: &[usize]) -> RouteContext {
    let fleet = test_fleet();
    let mut route_builder = RouteBuilder::default();
    route_builder.with_vehicle(&fleet, "v1");
    locations.iter().for_each(|&location| {
        route_builder.add_activity(test_activity_with_location(location));
    });

    let mut route_ctx = RouteContext::new_with_state(route_builder.build(), RouteState::default());
    create_timing_module().accept_route_state(&mut route_ctx);

    route_ctx
}

#[test]
fn can_update_route_schedules() {
    let route_ctx = create_route_ctx_with_locations(&[10, 20]);

    let tour = &route_ctx.route().tour;
    assert_eq!(tour.get(1).unwrap().schedule, Schedule::new(10., 10.));
    assert_eq!(tour.get(2).unwrap().schedule, Schedule::new(20., 20.));
    assert_eq!(tour.end().unwrap().schedule.arrival, 40.);
}

#[test]
fn can_update_latest_arrival_states() {
    let route_ctx = create_route_ctx_with_locations(&[10, 20]);

    let state = route_ctx.state();
    assert_eq_option!(state.get_activity_state::<Timestamp>(LATEST_ARRIVAL_KEY, 2).copied(), Some(980.));
    assert_eq_option!(state.get_activity_state::<Timestamp>(LATEST_ARRIVAL_KEY, 1).copied(), Some(970.));
    // terminal activities carry no job, hence no state
    assert!(state.get_activity_state::<Timestamp>(LATEST_ARRIVAL_KEY, 0).is_none());
}

#[test]
fn can_update_waiting_time_states() {
    let fleet = test_fleet();
    let mut route_builder = RouteBuilder::default();
    route_builder.with_vehicle(&fleet, "v1");
    let mut activity = test_activity_with_location(10);
    activity.place.time = TimeWindow::new(30., 1000.);
    route_builder.add_activity(activity);
    route_builder.add_activity(test_activity_with_location(20));

    let mut route_ctx = RouteContext::new_with_state(route_builder.build(), RouteState::default());
    create_timing_module().accept_route_state(&mut route_ctx);

    // arrival at 10, service starts at 30
    assert_eq!(route_ctx.route().tour.get(1).unwrap().schedule, Schedule::new(10., 30.));
    assert_eq_option!(route_ctx.state().get_activity_state::<Timestamp>(WAITING_KEY, 1).copied(), Some(20.));
    assert_eq_option!(route_ctx.state().get_activity_state::<Timestamp>(WAITING_KEY, 2).copied(), Some(0.));
}

parameterized_test! {can_gate_job_time_windows_on_route_level, (time, expected), {
    let route_ctx = create_route_ctx_with_locations(&[]);
    let job = SingleBuilder::default().time(time).build();
    let insertion_ctx = InsertionContext::new(&route_ctx, &job);

    assert_eq!(TimeHardRouteConstraint {}.evaluate_job(&insertion_ctx), expected);
}}

can_gate_job_time_windows_on_route_level! {
    case01_within_operating_time: (TimeWindow::new(0., 100.), None),
    case02_after_operating_time: (
        TimeWindow::new(1001., 2000.),
        Some(RouteConstraintViolation { code: ViolationCode::TimeWindow })
    ),
}

parameterized_test! {can_evaluate_activity_time_windows, (location, time, expected), {
    let route_ctx = create_route_ctx_with_locations(&[]);
    let job = SingleBuilder::default().location(location).time(time.clone()).build();
    let insertion_ctx = InsertionContext::new(&route_ctx, &job);

    let mut target_builder = ActivityBuilder::default();
    target_builder.location(location).time(time).job(Some(job.clone()));
    let target = target_builder.build();

    let tour = &route_ctx.route().tour;
    let activity_ctx = ActivityContext { index: 0, prev: tour.start().unwrap(), target: &target, next: tour.end() };

    let constraint = TimeHardActivityConstraint {
        activity: TestActivityCost::new_shared(),
        transport: TestTransportCost::new_shared(),
    };

    assert_eq!(constraint.evaluate_activity(&insertion_ctx, &activity_ctx), expected);
}}

can_evaluate_activity_time_windows! {
    case01_feasible: (10, TimeWindow::new(0., 1000.), Fulfilled),
    case02_cannot_be_served_in_time: (10, TimeWindow::new(0., 5.), NotFulfilled(ViolationCode::TimeWindow)),
    case03_after_operating_time: (10, TimeWindow::new(1001., 2000.), NotFulfilledBreak(ViolationCode::TimeWindow)),
}

#[test]
fn can_reject_position_when_next_activity_gets_late() {
    let route_ctx = create_route_ctx_with_locations(&[10]);
    let job = SingleBuilder::default().location(501).build();
    let insertion_ctx = InsertionContext::new(&route_ctx, &job);
    let mut target_builder = ActivityBuilder::default();
    target_builder.location(501).job(Some(job.clone()));
    let target = target_builder.build();

    let tour = &route_ctx.route().tour;
    // between the activity at 10 and the route end: the detour to 501 breaks the return in time,
    // yet a position further down the tour may still be feasible
    let activity_ctx = ActivityContext { index: 1, prev: tour.get(1).unwrap(), target: &target, next: tour.end() };

    let constraint = TimeHardActivityConstraint {
        activity: TestActivityCost::new_shared(),
        transport: TestTransportCost::new_shared(),
    };

    assert_eq!(constraint.evaluate_activity(&insertion_ctx, &activity_ctx), NotFulfilled(ViolationCode::TimeWindow));
}

#[test]
fn can_schedule_vehicle_break_within_route() {
    let fleet = FleetBuilder::default()
        .add_vehicle(
            VehicleBuilder::default()
                .vehicle_break(VehicleBreak { time: TimeWindow::new(100., 200.), duration: 10., location: Some(10) })
                .build(),
        )
        .build();
    let mut route_ctx = RouteContext::new(get_test_actor_from_fleet(&fleet, "v1"));
    create_timing_module().accept_route_state(&mut route_ctx);

    let tour = &route_ctx.route().tour;
    assert_eq!(tour.total(), 3);
    assert_eq!(tour.get(1).unwrap().activity_type, ActivityType::Break);
    // arrives early and waits for the break window to open
    assert_eq!(tour.get(1).unwrap().schedule, Schedule::new(10., 110.));
    assert_eq_option!(route_ctx.state().get_activity_state::<Timestamp>(WAITING_KEY, 1).copied(), Some(90.));
    assert_eq_option!(route_ctx.state().get_activity_state::<Timestamp>(LATEST_ARRIVAL_KEY, 1).copied(), Some(200.));
}
