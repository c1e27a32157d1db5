use super::*;
use crate::helpers::models::problem::*;
use crate::helpers::models::solution::*;
use ActivityConstraintStatus::{Fulfilled, NotFulfilled, NotFulfilledBreak};
use ViolationCode::{Capacity, TimeWindow};

struct TestConstraintModule {
    state_keys: Vec<i32>,
    constraints: Vec<ConstraintVariant>,
}

impl ConstraintModule for TestConstraintModule {
    fn accept_route_state(&self, _: &mut RouteContext) {}

    fn state_keys(&self) -> Iter<'_, i32> {
        self.state_keys.iter()
    }

    fn get_constraints(&self) -> Iter<'_, ConstraintVariant> {
        self.constraints.iter()
    }
}

struct StaticHardRouteConstraint {
    code: Option<ViolationCode>,
}

impl HardRouteConstraint for StaticHardRouteConstraint {
    fn evaluate_job(&self, _: &InsertionContext) -> Option<RouteConstraintViolation> {
        self.code.map(|code| RouteConstraintViolation { code })
    }
}

struct StaticHardActivityConstraint {
    status: ActivityConstraintStatus,
}

impl HardActivityConstraint for StaticHardActivityConstraint {
    fn evaluate_activity(&self, _: &InsertionContext, _: &ActivityContext) -> ActivityConstraintStatus {
        self.status
    }
}

struct StaticSoftActivityConstraint {
    cost: Cost,
}

impl SoftActivityConstraint for StaticSoftActivityConstraint {
    fn estimate_activity(&self, _: &InsertionContext, _: &ActivityContext) -> Cost {
        self.cost
    }
}

fn create_module(state_keys: Vec<i32>, constraints: Vec<ConstraintVariant>) -> Box<dyn ConstraintModule + Send + Sync> {
    Box::new(TestConstraintModule { state_keys, constraints })
}

fn create_route_module(code: Option<ViolationCode>) -> Box<dyn ConstraintModule + Send + Sync> {
    create_module(vec![], vec![ConstraintVariant::HardRoute(Arc::new(StaticHardRouteConstraint { code }))])
}

#[test]
#[should_panic]
fn can_detect_duplicate_state_key() {
    ConstraintPipeline::default()
        .add_module(create_module(vec![1, 2], vec![]), ConstraintPriority::Low)
        .add_module(create_module(vec![2], vec![]), ConstraintPriority::Low);
}

parameterized_test! {can_aggregate_hard_activity_statuses, (statuses, expected), {
    let constraints = statuses
        .into_iter()
        .map(|status| ConstraintVariant::HardActivity(Arc::new(StaticHardActivityConstraint { status })))
        .collect();
    let mut pipeline = ConstraintPipeline::default();
    pipeline.add_module(create_module(vec![], constraints), ConstraintPriority::Low);

    let route_ctx = RouteContextBuilder::default().build();
    let job = test_single_job();
    let insertion_ctx = InsertionContext::new(&route_ctx, &job);
    let prev = ActivityBuilder::default().job(None).build();
    let target = ActivityBuilder::default().job(None).build();
    let activity_ctx = ActivityContext { index: 0, prev: &prev, target: &target, next: None };

    assert_eq!(pipeline.evaluate_hard_activity(&insertion_ctx, &activity_ctx), expected);
}}

can_aggregate_hard_activity_statuses! {
    case01_all_fulfilled: (vec![Fulfilled, Fulfilled], Fulfilled),
    case02_first_rejection_kept: (vec![NotFulfilled(TimeWindow), Fulfilled], NotFulfilled(TimeWindow)),
    case03_first_rejection_wins: (vec![NotFulfilled(TimeWindow), NotFulfilled(Capacity)], NotFulfilled(TimeWindow)),
    case04_break_wins_over_rejection: (vec![NotFulfilled(TimeWindow), NotFulfilledBreak(Capacity)], NotFulfilledBreak(Capacity)),
    case05_break_stops_evaluation: (vec![Fulfilled, NotFulfilledBreak(Capacity), NotFulfilled(TimeWindow)], NotFulfilledBreak(Capacity)),
}

#[test]
fn can_evaluate_hard_route_constraints_in_priority_order() {
    let mut pipeline = ConstraintPipeline::default();
    pipeline
        .add_module(create_route_module(Some(Capacity)), ConstraintPriority::Low)
        .add_module(create_route_module(Some(TimeWindow)), ConstraintPriority::Critical);

    let route_ctx = RouteContextBuilder::default().build();
    let job = test_single_job();
    let insertion_ctx = InsertionContext::new(&route_ctx, &job);

    assert_eq!(pipeline.evaluate_hard_route(&insertion_ctx), Some(RouteConstraintViolation { code: TimeWindow }));
}

#[test]
fn can_skip_fulfilled_hard_route_constraints() {
    let mut pipeline = ConstraintPipeline::default();
    pipeline
        .add_module(create_route_module(None), ConstraintPriority::Critical)
        .add_module(create_route_module(Some(Capacity)), ConstraintPriority::Low);

    let route_ctx = RouteContextBuilder::default().build();
    let job = test_single_job();
    let insertion_ctx = InsertionContext::new(&route_ctx, &job);

    assert_eq!(pipeline.evaluate_hard_route(&insertion_ctx), Some(RouteConstraintViolation { code: Capacity }));
}

#[test]
fn can_sum_soft_activity_costs() {
    let constraints = vec![
        ConstraintVariant::SoftActivity(Arc::new(StaticSoftActivityConstraint { cost: 1.5 })),
        ConstraintVariant::SoftActivity(Arc::new(StaticSoftActivityConstraint { cost: 2.0 })),
    ];
    let mut pipeline = ConstraintPipeline::default();
    pipeline.add_module(create_module(vec![], constraints), ConstraintPriority::Low);

    let route_ctx = RouteContextBuilder::default().build();
    let job = test_single_job();
    let insertion_ctx = InsertionContext::new(&route_ctx, &job);
    let prev = ActivityBuilder::default().job(None).build();
    let target = ActivityBuilder::default().job(None).build();
    let activity_ctx = ActivityContext { index: 0, prev: &prev, target: &target, next: None };

    assert_eq!(pipeline.evaluate_soft_activity(&insertion_ctx, &activity_ctx), 3.5);
}
