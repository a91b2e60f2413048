//! Writes `sample_survey.csv`: a deterministic course-feedback export with
//! two header rows, for trying the dashboard without real data.

use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Likert score 1–5 leaning towards `bias`, blank about 5% of the time.
    fn likert(&mut self, bias: f64) -> String {
        if self.next_f64() < 0.05 {
            return String::new();
        }
        let score = (bias + (self.next_f64() - 0.5) * 3.0).round().clamp(1.0, 5.0);
        format!("{score}")
    }
}

const CLASSES: &[&str] = &["甲班", "乙班", "丙班"];
const DEPARTMENTS: &[&str] = &["資工系", "電機系", "中文系", "外文系"];
const GRADES: &[&str] = &["1", "2", "3", "4"];
const UNITS: &[&str] = &["古典詩詞", "現代散文", "小說選讀", "應用文寫作"];
const RECOMMEND: &[&str] = &["是", "否", "看情況"];
const PHRASES: &[&str] = &[
    "老師講解清楚",
    "課程內容很有趣",
    "作業份量有點多",
    "希望增加討論時間",
    "程式設計的例子很實用",
    "上課節奏太快",
    "學到很多寫作技巧",
    "分組報告很有收穫",
];

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = "sample_survey.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    writer.write_record([
        "基本資料", "基本資料", "基本資料", "課程滿意度", "課程滿意度", "課程滿意度",
        "課程滿意度", "學習經驗", "學習經驗", "學習經驗", "質性回饋", "質性回饋",
    ])?;
    writer.write_record([
        "班級", "學系", "年級", "課程內容", "教學方式", "作業份量", "整體滿意度",
        "最喜歡的單元", "是否推薦", "暱稱", "學習心得", "建議",
    ])?;

    let respondents = 120;
    for id in 0..respondents {
        let class = rng.pick(CLASSES);
        let bias = match class {
            "甲班" => 4.2,
            "乙班" => 3.6,
            _ => 3.0,
        };
        let feedback = format!("{}，{}", rng.pick(PHRASES), rng.pick(PHRASES));
        let suggestion = if rng.next_f64() < 0.3 {
            String::new()
        } else {
            rng.pick(PHRASES).to_string()
        };

        writer.write_record([
            class.to_string(),
            rng.pick(DEPARTMENTS).to_string(),
            rng.pick(GRADES).to_string(),
            rng.likert(bias),
            rng.likert(bias + 0.3),
            rng.likert(bias - 0.8),
            rng.likert(bias),
            rng.pick(UNITS).to_string(),
            rng.pick(RECOMMEND).to_string(),
            format!("學員{id:03}"),
            feedback,
            suggestion,
        ])?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {respondents} responses to {output_path}");
    Ok(())
}
