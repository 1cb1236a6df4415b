use criterion::*;
use dalek_ecs::game::{Animation, Position, SpriteHandle, Velocity, AI};
use dalek_ecs::prelude::*;
use rand::prelude::SliceRandom;
use rand::thread_rng;

const COUNT: usize = 10000;

fn populate(world: &mut World) -> Vec<Entity> {
    (0..COUNT as i32)
        .map(|i| match i % 3 {
            0 => world.add_entity((Position::new(i, 0), Velocity::new(1, 0), AI)),
            1 => world.add_entity((Position::new(i, 1), Velocity::new(0, 1))),
            _ => world.add_entity((
                Position::new(i, 2),
                Animation::new(vec![SpriteHandle(0), SpriteHandle(1)], 120).repeating(),
            )),
        })
        .collect()
}

fn create_entities(c: &mut Criterion) {
    c.bench_function("Create entities", |b| {
        b.iter_batched(
            World::<()>::new,
            |mut world| {
                populate(&mut world);
                world
            },
            BatchSize::PerIteration,
        );
    });
}

fn remove_entities(c: &mut Criterion) {
    c.bench_function("Remove entities", |b| {
        b.iter_batched(
            || {
                let mut world = World::<()>::new();
                let mut entities = populate(&mut world);
                entities.shuffle(&mut thread_rng());
                (world, entities)
            },
            |(mut world, entities)| {
                world.mark_for_removal(&entities);
                world.reconcile_removals();
                world
            },
            BatchSize::PerIteration,
        );
    });
}

fn query_entities(c: &mut Criterion) {
    let mut group = c.benchmark_group("Query entities");

    for (name, config) in [
        ("Cached", WorldConfig::default()),
        ("Uncached", WorldConfig::default().with_query_cache(false)),
    ] {
        group.bench_function(name, |b| {
            let mut world = World::<()>::with_config(config.clone(), EventBus::new());
            populate(&mut world);

            b.iter(|| {
                for (_, (position, velocity)) in world.get_entities_with::<(Position, Velocity)>() {
                    let velocity = velocity.get();
                    let mut position = position.borrow_mut();
                    position.x += velocity.x;
                    position.y += velocity.y;
                }
            })
        });
    }

    group.bench_function("Rare component", |b| {
        let mut world = World::<()>::new();
        populate(&mut world);

        b.iter(|| black_box(world.get_entities_with::<(AI, Position, Velocity)>().len()))
    });
}

criterion_group!(benchmarks, create_entities, remove_entities, query_entities);
criterion_main!(benchmarks);
