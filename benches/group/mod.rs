pub const WARM_UP_TIME: u64 = 3;
pub const MEASUREMENT_TIME: u64 = 7;
/// сколько раз повторить текст в одном прогоне
pub const REPEAT: usize = 10;

/// каталог с тестовыми текстами
pub const TEXTS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/test_data/texts");

#[macro_export]
macro_rules! group {
    ($fn: ident, $test: ident, $group: expr, $name: expr, $normalizer: expr) => {
        #[inline(never)]
        fn $test<N: Normalize>(normalizer: &N, source: &str) -> String
        {
            normalizer.run(source)
        }

        fn $fn(c: &mut Criterion)
        {
            let mut group = c.benchmark_group($group);
            let normalizer = $normalizer;

            group.warm_up_time(core::time::Duration::from_secs(group::WARM_UP_TIME));
            group.measurement_time(core::time::Duration::from_secs(group::MEASUREMENT_TIME));

            for data in group::read_dir(group::TEXTS, group::REPEAT) {
                let text_name = data.0.as_str();
                let text = data.1.as_str();

                group.bench_with_input(
                    criterion::BenchmarkId::new($name, &text_name),
                    &(&normalizer, text),
                    |b, data| b.iter(|| $test(data.0, criterion::black_box(data.1))),
                );
            }

            group.finish();
        }
    };
}

/// тексты из каталога: название файла без расширения и содержимое, повторённое `times` раз
pub fn read_dir(dir: &str, times: usize) -> Vec<(String, String)>
{
    let mut data: Vec<(String, String)> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().map_or(false, |ext| ext == "txt"))
        .map(|path| {
            let name = path.file_stem().unwrap().to_string_lossy().into_owned();
            let text = std::fs::read_to_string(&path).unwrap();

            (name, text.repeat(times))
        })
        .collect();

    data.sort_by(|a, b| a.0.cmp(&b.0));

    data
}
