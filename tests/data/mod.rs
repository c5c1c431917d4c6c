use std::fs;

/// тексты на разных языках: название файла без расширения и содержимое
pub fn files() -> Vec<(String, String)>
{
    let mut data: Vec<(String, String)> = fs::read_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/test_data/texts"))
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .map(|path| {
            let name = path.file_stem().unwrap().to_string_lossy().into_owned();

            (name, fs::read_to_string(&path).unwrap())
        })
        .collect();

    data.sort_by(|a, b| a.0.cmp(&b.0));

    data
}

/// позиции разбиения строки на две части: каждая `step`-я граница символа
pub fn split_points(text: &str, step: usize) -> Vec<usize>
{
    text.char_indices().map(|(i, _)| i).step_by(step).collect()
}
