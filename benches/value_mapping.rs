use criterion::{black_box, criterion_group, criterion_main, Criterion};
use provisioning_form::adapters::{get_init_values_from_provision, prepare_provision_values_for_save};
use provisioning_form::domain::{FormValues, ProvisioningRecord};
use provisioning_form::schema::{ec2_form_layout, LayoutValidator};
use serde_json::json;

fn create_record() -> ProvisioningRecord {
    serde_json::from_value(json!({
        "id": "bench",
        "name": "engine",
        "currentState": "RUNNING",
        "dynamicConfig": { "containerCount": 8 },
        "awsProps": {
            "vpc": "vpc-1",
            "instanceType": "m5d.8xlarge",
            "useClusterPlacementGroup": true,
            "connectionProps": {
                "authMode": "AUTO",
                "region": "us-east-1",
                "endpoint": "https://stale"
            }
        }
    }))
    .unwrap()
}

fn benchmark_read_path(c: &mut Criterion) {
    let record = create_record();

    c.bench_function("get_init_values_from_provision", |b| {
        b.iter(|| get_init_values_from_provision(black_box(&record), FormValues::new()))
    });
}

fn benchmark_write_path(c: &mut Criterion) {
    let values = get_init_values_from_provision(&create_record(), FormValues::new());

    c.bench_function("prepare_provision_values_for_save", |b| {
        b.iter(|| prepare_provision_values_for_save(black_box(&values)))
    });

    c.bench_function("save_payload_to_json", |b| {
        b.iter(|| serde_json::to_string(&prepare_provision_values_for_save(black_box(&values))).unwrap())
    });
}

fn benchmark_layout(c: &mut Criterion) {
    let layout = ec2_form_layout();

    c.bench_function("validate_layout", |b| {
        b.iter(|| LayoutValidator::validate(black_box(layout)))
    });
}

criterion_group!(benches, benchmark_read_path, benchmark_write_path, benchmark_layout);
criterion_main!(benches);
