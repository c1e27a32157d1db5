use super::*;
use crate::construction::heuristics::{Inserter, InsertionSuccess};
use crate::helpers::construction::*;
use crate::helpers::models::problem::*;
use crate::helpers::models::solution::*;
use crate::models::common::{Demand, Load, TimeWindow};
use crate::models::problem::{VehicleBreak, VehicleDetail};

const EPSILON: f64 = 0.05;

/// Grid locations: 0 is the depot, 1/2 are pickup/delivery of job "a", 3/4 of job "b",
/// 5 is the pickup of job "c" with two delivery alternatives at 6 and 7.
fn scenario_coords() -> Vec<(f64, f64)> {
    vec![(0., 0.), (0., 10.), (10., 0.), (10., 10.), (0., 0.), (0., 0.), (9., 10.), (9., 9.)]
}

fn job_a() -> Job {
    PairBuilder::default().id("a").pickup_location(1).delivery_location(2).build()
}

fn job_b() -> Job {
    PairBuilder::default().id("b").pickup_location(3).delivery_location(4).build()
}

fn job_c(delivery: usize) -> Job {
    PairBuilder::default().id("c").pickup_location(5).delivery_location(delivery).build()
}

fn create_grid_setup() -> (Arc<ConstraintPipeline>, InsertionDispatcher, RouteContext) {
    let transport = GridTransportCost::new_shared(scenario_coords());
    let pipeline = create_constraint_pipeline(transport.clone());
    let dispatcher = create_dispatcher(pipeline.clone(), transport);

    let fleet = FleetBuilder::default().add_vehicle(VehicleBuilder::default().capacity(100).build()).build();
    let mut route_ctx = RouteContext::new(get_test_actor_from_fleet(&fleet, "v1"));
    pipeline.accept_route_state(&mut route_ctx);

    (pipeline, dispatcher, route_ctx)
}

fn get_success(result: InsertionResult) -> InsertionSuccess {
    match result {
        InsertionResult::Success(success) => success,
        InsertionResult::Failure(failure) => panic!("expected success, got failure: {:?}", failure.code),
    }
}

fn get_positions(success: &InsertionSuccess) -> Vec<usize> {
    success.activities.iter().map(|(_, index)| *index).collect()
}

#[test]
fn can_insert_pair_into_empty_route() {
    let (_, dispatcher, route_ctx) = create_grid_setup();

    let success = get_success(dispatcher.evaluate(&route_ctx, &job_a(), f64::MAX));

    assert!((success.cost - 40.).abs() < EPSILON);
    assert_eq!(get_positions(&success), vec![0, 0]);
}

#[test]
fn can_find_cheapest_pair_positions_in_loaded_route() {
    let (pipeline, dispatcher, mut route_ctx) = create_grid_setup();
    let inserter = Inserter::new(pipeline);

    let success_a = get_success(dispatcher.evaluate(&route_ctx, &job_a(), f64::MAX));
    inserter.commit(&mut route_ctx, success_a);
    let success_b = get_success(dispatcher.evaluate(&route_ctx, &job_b(), f64::MAX));
    assert_eq!(get_positions(&success_b), vec![1, 2]);
    inserter.commit(&mut route_ctx, success_b);

    // both pickups ended up before both deliveries
    let locations = route_ctx.route().tour.all_activities().map(|a| a.place.location).collect::<Vec<_>>();
    assert_eq!(locations, vec![0, 1, 3, 2, 4, 0]);

    let success = get_success(dispatcher.evaluate(&route_ctx, &job_c(6), f64::MAX));
    assert!(success.cost.abs() < EPSILON);
    assert_eq!(get_positions(&success), vec![0, 1]);

    let success = get_success(dispatcher.evaluate(&route_ctx, &job_c(7), f64::MAX));
    assert!((success.cost - 2.).abs() < EPSILON);
    assert_eq!(get_positions(&success), vec![0, 1]);
}

#[test]
fn can_produce_identical_results_without_commit() {
    let (_, dispatcher, route_ctx) = create_grid_setup();
    let job = job_a();

    let first = get_success(dispatcher.evaluate(&route_ctx, &job, f64::MAX));
    let second = get_success(dispatcher.evaluate(&route_ctx, &job, f64::MAX));

    assert_eq!(first.cost, second.cost);
    assert_eq!(get_positions(&first), get_positions(&second));
    assert_eq!(route_ctx.route().tour.total(), 2);
}

#[test]
fn can_respect_best_known_cost() {
    let (_, dispatcher, route_ctx) = create_grid_setup();

    let result = dispatcher.evaluate(&route_ctx, &job_a(), 39.95);

    match result {
        InsertionResult::Failure(failure) => {
            assert_eq!(failure.code, ViolationCode::Unknown);
            assert!(failure.job.is_some());
        }
        InsertionResult::Success(_) => panic!("expected failure as all positions are above the cost bound"),
    }
}

#[test]
fn can_insert_single_into_empty_route_at_only_candidate() {
    let pipeline = create_test_pipeline();
    let dispatcher = create_dispatcher(pipeline.clone(), TestTransportCost::new_shared());
    let mut route_ctx = RouteContext::new(test_actor());
    pipeline.accept_route_state(&mut route_ctx);

    let success = get_success(dispatcher.evaluate(&route_ctx, &test_single_with_location(5), f64::MAX));

    assert_eq!(success.cost, 10.);
    assert_eq!(get_positions(&success), vec![0]);
}

#[test]
fn can_insert_single_at_open_route_tail() {
    let transport = TestTransportCost::new_shared();
    let pipeline = create_constraint_pipeline(transport.clone());
    let dispatcher = create_dispatcher(pipeline.clone(), transport);
    let fleet = FleetBuilder::default()
        .add_vehicle(VehicleBuilder::default().detail(VehicleDetail { end: None, ..test_vehicle_detail() }).build())
        .build();
    let mut route_ctx = RouteContext::new(get_test_actor_from_fleet(&fleet, "v1"));
    pipeline.accept_route_state(&mut route_ctx);

    let success = get_success(dispatcher.evaluate(&route_ctx, &test_single_with_location(5), f64::MAX));

    // no return leg is priced on an open route
    assert_eq!(success.cost, 5.);
    assert_eq!(get_positions(&success), vec![0]);
}

#[test]
fn can_continue_scan_when_arrival_is_late_at_one_position() {
    let transport = TestTransportCost::new_shared();
    let pipeline = create_constraint_pipeline(transport.clone());
    let dispatcher = create_dispatcher(pipeline.clone(), transport);
    let fleet = test_fleet();
    let mut tight = test_activity_with_location(10);
    tight.place.time = TimeWindow::new(0., 10.);
    let mut route_ctx = RouteContextBuilder::default()
        .with_route(RouteBuilder::default().with_vehicle(&fleet, "v1").add_activity(tight).build())
        .build();
    pipeline.accept_route_state(&mut route_ctx);

    // too late to detour before the tightly windowed activity, still fine after it
    let success = get_success(dispatcher.evaluate(&route_ctx, &test_single_with_location(20), f64::MAX));

    assert_eq!(get_positions(&success), vec![1]);
}

#[test]
fn can_insert_single_around_vehicle_break() {
    let transport = TestTransportCost::new_shared();
    let pipeline = create_constraint_pipeline(transport.clone());
    let dispatcher = create_dispatcher(pipeline.clone(), transport);
    let fleet = FleetBuilder::default()
        .add_vehicle(
            VehicleBuilder::default()
                .vehicle_break(VehicleBreak { time: TimeWindow::new(0., 1000.), duration: 0., location: Some(10) })
                .build(),
        )
        .build();
    let mut route_ctx = RouteContext::new(get_test_actor_from_fleet(&fleet, "v1"));
    pipeline.accept_route_state(&mut route_ctx);

    assert_eq!(route_ctx.route().tour.total(), 3);
    assert_eq!(route_ctx.route().tour.get(1).unwrap().activity_type, ActivityType::Break);

    let success = get_success(dispatcher.evaluate(&route_ctx, &test_single_with_location(15), f64::MAX));

    // detours before and after the break cost the same, the first position wins
    assert_eq!(success.cost, 10.);
    assert_eq!(get_positions(&success), vec![0]);
}

parameterized_test! {can_report_violation_code, (job, expected), {
    let pipeline = create_test_pipeline();
    let dispatcher = create_dispatcher(pipeline.clone(), TestTransportCost::new_shared());
    let mut route_ctx = RouteContext::new(test_actor());
    pipeline.accept_route_state(&mut route_ctx);

    match dispatcher.evaluate(&route_ctx, &job, f64::MAX) {
        InsertionResult::Failure(failure) => {
            assert_eq!(failure.code, expected);
            assert!(failure.job.is_some());
        }
        InsertionResult::Success(_) => panic!("expected failure"),
    }
}}

can_report_violation_code! {
    case01_capacity: (
        SingleBuilder::default().demand(Demand::delivery(Load::single(11))).build(),
        ViolationCode::Capacity
    ),
    case02_time_window: (
        SingleBuilder::default().time(TimeWindow::new(1001., 2000.)).build(),
        ViolationCode::TimeWindow
    ),
    case03_unreachable_in_time: (
        SingleBuilder::default().location(600).time(TimeWindow::new(0., 500.)).build(),
        ViolationCode::TimeWindow
    ),
}

#[test]
#[should_panic]
fn can_panic_on_unregistered_job_shape() {
    let dispatcher = InsertionDispatcher::default();

    dispatcher.evaluate(&RouteContextBuilder::default().build(), &test_single_job(), f64::MAX);
}
