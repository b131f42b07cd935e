use inventory_sim::{
    generate_constant_demand, simulate, write_history_to, InventorySimulation, OrderPolicy,
    PolicyKind, ReplenishmentPolicy, SimulationParams,
};

fn params(policy: &str) -> SimulationParams {
    SimulationParams {
        policy: policy.into(),
        ..SimulationParams::default()
    }
}

#[test]
fn flat_demand_base_stock_example() {
    let records = simulate("basestock", 1.0, 10.0, 30.0, 100.0, 0.0, 0, 5, 123).unwrap();

    assert_eq!(records.len(), 5);
    for (t, r) in records.iter().enumerate() {
        assert_eq!(r.t, t);
        assert_eq!(r.demand, 100.0);
        assert_eq!(r.arrivals, 0.0);
        assert_eq!(r.on_hand, 0.0);
        assert_eq!(r.backlog, 0.0);
        assert_eq!(r.order, 100.0);
        assert_eq!(r.holding_cost, 0.0);
        assert_eq!(r.backlog_cost, 0.0);
        assert_eq!(r.purchase_cost, 1000.0);
        assert_eq!(r.total_cost, 1000.0);
    }
}

#[test]
fn immediate_replenishment_keeps_position_at_base_stock_level() {
    // With no lead time and no variability, S = 0: every period the position drops by
    // one period of demand and the order restores it.
    let config = SimulationParams {
        lead_time: 0,
        std_dev_demand: 0.0,
        periods: 20,
        ..params("basestock")
    }
    .validate()
    .unwrap();
    let mut sim = InventorySimulation::new(config).unwrap();
    let target = sim.policy().target_level();
    assert_eq!(target, 0.0);
    sim.run();

    for r in &sim.history {
        assert_eq!(r.inventory_position, target - 100.0);
        assert_eq!(r.on_hand - r.backlog, target);
        assert_eq!(r.order, 100.0);
    }
}

#[test]
fn eoq_orders_when_position_reaches_reorder_point() {
    // Q = sqrt(2 * 100 * 50 / 1) = 100, R = 2 * 50 = 100.
    let config = SimulationParams {
        mean_demand: 50.0,
        std_dev_demand: 0.0,
        lead_time: 2,
        periods: 8,
        ..params("eoq")
    }
    .validate()
    .unwrap();
    let demand = generate_constant_demand(8, 50.0).unwrap();
    let mut sim = InventorySimulation::with_demand(config, demand).unwrap();
    let (q, r) = match sim.policy() {
        ReplenishmentPolicy::Eoq(p) => (p.fixed_quantity(), p.reorder_point()),
        other => panic!("expected eoq, got {other:?}"),
    };
    assert_eq!((q, r), (100.0, 100.0));
    sim.run();
    let h = &sim.history;

    // Period 4 sits above R and orders nothing; period 5 lands exactly on R.
    assert_eq!(h[4].inventory_position, 150.0);
    assert_eq!(h[4].order, 0.0);
    assert_eq!(h[5].inventory_position, r);
    assert_eq!(h[5].order, q);

    // EOQ only ever orders nothing or exactly Q.
    assert!(h.iter().all(|rec| rec.order == 0.0 || rec.order == q));
}

#[test]
fn newsvendor_without_variability_orders_up_to_mean() {
    for (c, p) in [(10.0, 30.0), (25.0, 30.0), (0.0, 5.0)] {
        let config = SimulationParams {
            purchase_cost: c,
            backlog_cost: p,
            std_dev_demand: 0.0,
            lead_time: 0,
            periods: 6,
            ..params("newsvendor")
        }
        .validate()
        .unwrap();
        let mut sim = InventorySimulation::new(config).unwrap();
        assert_eq!(sim.policy().target_level(), 100.0);
        sim.run();

        // Order up to 100, so 100 sits on the shelf after each period.
        for r in &sim.history {
            assert_eq!(r.on_hand, 100.0);
            assert_eq!(r.backlog, 0.0);
        }
        assert_eq!(sim.history[0].order, 200.0);
        assert!(sim.history[1..].iter().all(|r| r.order == 100.0));
    }
}

#[test]
fn identical_inputs_reproduce_bit_for_bit() {
    for policy in PolicyKind::ALL {
        let a = simulate(policy.tag(), 1.0, 10.0, 30.0, 100.0, 25.0, 3, 200, 42).unwrap();
        let b = simulate(policy.tag(), 1.0, 10.0, 30.0, 100.0, 25.0, 3, 200, 42).unwrap();
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.on_hand.to_bits(), y.on_hand.to_bits());
            assert_eq!(x.backlog.to_bits(), y.backlog.to_bits());
            assert_eq!(x.order.to_bits(), y.order.to_bits());
            assert_eq!(x.total_cost.to_bits(), y.total_cost.to_bits());
        }
    }
}

#[test]
fn policies_see_the_same_demand() {
    let eoq = simulate("eoq", 1.0, 10.0, 30.0, 100.0, 25.0, 2, 50, 9).unwrap();
    let bs = simulate("basestock", 1.0, 10.0, 30.0, 100.0, 25.0, 2, 50, 9).unwrap();
    let demand = |rs: &[inventory_sim::PeriodRecord]| rs.iter().map(|r| r.demand).collect::<Vec<_>>();
    assert_eq!(demand(&eoq), demand(&bs));
}

#[test]
fn history_csv_has_one_row_per_period() {
    let records = simulate("eoq", 1.0, 10.0, 30.0, 100.0, 25.0, 2, 12, 7).unwrap();
    let mut buf = Vec::new();
    write_history_to(&mut buf, &records).unwrap();

    let mut reader = csv::Reader::from_reader(buf.as_slice());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.len(), 10);
    assert_eq!(&headers[0], "t");
    assert_eq!(&headers[9], "total_cost");

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 12);
    for (t, row) in rows.iter().enumerate() {
        assert_eq!(row[0].parse::<usize>().unwrap(), t);
        let order: f64 = row[5].parse().unwrap();
        assert_eq!(order, records[t].order);
    }
}
