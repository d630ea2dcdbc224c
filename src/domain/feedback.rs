use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackDomain {
    Writing,
    Speaking,
}

impl FeedbackDomain {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackDomain::Writing => "writing",
            FeedbackDomain::Speaking => "speaking",
        }
    }

    /// Ascending exclusive upper bounds; a score at or above the last bound
    /// lands in the final bucket.
    pub fn thresholds(&self) -> &'static [f32] {
        match self {
            FeedbackDomain::Writing => &WRITING_THRESHOLDS,
            FeedbackDomain::Speaking => &SPEAKING_THRESHOLDS,
        }
    }

    pub fn criteria(&self) -> &'static [&'static str] {
        match self {
            FeedbackDomain::Writing => &WRITING_CRITERIA,
            FeedbackDomain::Speaking => &SPEAKING_CRITERIA,
        }
    }

    fn texts(&self) -> &'static [[&'static str; 4]] {
        match self {
            FeedbackDomain::Writing => &WRITING_TEXTS,
            FeedbackDomain::Speaking => &SPEAKING_TEXTS,
        }
    }
}

impl fmt::Display for FeedbackDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackBundle {
    domain: FeedbackDomain,
    bucket: usize,
}

impl FeedbackBundle {
    pub fn domain(&self) -> FeedbackDomain {
        self.domain
    }

    pub fn bucket(&self) -> usize {
        self.bucket
    }

    pub fn get(&self, criterion: &str) -> Option<&'static str> {
        self.iter()
            .find(|(name, _)| *name == criterion)
            .map(|(_, text)| text)
    }

    /// Criterion name and text pairs in the domain's fixed criterion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + use<> {
        let texts = self.domain.texts()[self.bucket];
        self.domain
            .criteria()
            .iter()
            .copied()
            .zip(texts)
    }
}

/// Selects the feedback bundle for `score`. Total: NaN falls through to the
/// highest bucket.
pub fn feedback_for(domain: FeedbackDomain, score: f32) -> FeedbackBundle {
    let thresholds = domain.thresholds();
    let bucket = thresholds
        .iter()
        .position(|&upper| score < upper)
        .unwrap_or(thresholds.len());

    FeedbackBundle { domain, bucket }
}

const WRITING_THRESHOLDS: [f32; 4] = [5.0, 5.5, 6.5, 7.5];
const SPEAKING_THRESHOLDS: [f32; 2] = [5.0, 6.5];

const WRITING_CRITERIA: [&str; 4] = [
    "task_response",
    "coherence_cohesion",
    "vocabulary",
    "grammar",
];

const SPEAKING_CRITERIA: [&str; 4] = [
    "fluency_coherence",
    "vocabulary",
    "grammar",
    "pronunciation",
];

const WRITING_TEXTS: [[&str; 4]; 5] = [
    [
        "Bài viết chưa trả lời đầy đủ yêu cầu đề bài. Hãy tập trung hiểu rõ câu hỏi và đưa ra các ý chính liên quan.",
        "Cấu trúc bài cần cải thiện. Sử dụng các đoạn văn rõ ràng với câu chủ đề và từ nối.",
        "Vốn từ vựng còn hạn chế. Cần học thêm từ vựng theo chủ đề và các cụm từ cố định (collocations).",
        "Nhiều lỗi ngữ pháp ảnh hưởng đến ý nghĩa. Cần luyện tập các cấu trúc câu cơ bản và các thì phổ biến.",
    ],
    [
        "Bài viết đã đề cập đến yêu cầu đề nhưng chưa đầy đủ. Hãy mở rộng ý tưởng với các ví dụ cụ thể và chi tiết hơn.",
        "Cấu trúc bài cần cải thiện. Mỗi đoạn văn cần có câu chủ đề rõ ràng và các câu hỗ trợ. Sử dụng đa dạng hơn các từ nối như 'furthermore', 'however', 'consequently'.",
        "Vốn từ cơ bản, có xu hướng lặp lại. Hãy học thêm synonyms và các cụm từ học thuật như 'it is widely believed that', 'there is a growing concern about'.",
        "Lỗi ngữ pháp xuất hiện khá thường xuyên. Cần chú ý đến subject-verb agreement, article usage, và các thì động từ.",
    ],
    [
        "Bạn đã trả lời được yêu cầu đề bài nhưng một số điểm có thể phát triển thêm với ví dụ cụ thể hơn.",
        "Bài viết có tổ chức hợp lý nhưng có thể cải thiện cách chia đoạn. Sử dụng đa dạng hơn các từ nối và tránh lặp lại 'firstly, secondly, thirdly'.",
        "Vốn từ đủ dùng cho bài viết. Hãy thử dùng từ ngữ phức tạp hơn như collocations và idiomatic expressions.",
        "Ngữ pháp khá tốt với một số lỗi nhỏ. Cần luyện thêm các cấu trúc câu phức tạp như relative clauses, conditionals, và passive voice.",
    ],
    [
        "Bài viết phát triển tốt với quan điểm rõ ràng và các ý tưởng mở rộng, liên quan. Để đạt band cao hơn, cần có phân tích sâu sắc hơn.",
        "Tổ chức logic với việc sử dụng hiệu quả các phương tiện liên kết. Có thể cải thiện bằng cách sử dụng referencing pronouns và lexical cohesion.",
        "Vốn từ phong phú và đa dạng. Tiếp tục mở rộng academic vocabulary và less common lexical items.",
        "Sử dụng đa dạng cấu trúc ngữ pháp với độ chính xác cao. Có thể thử thêm inversions và cleft sentences.",
    ],
    [
        "Bài viết xuất sắc với phân tích sâu sắc và lập luận chặt chẽ. Ý tưởng được phát triển đầy đủ và có tính thuyết phục.",
        "Tổ chức hoàn hảo với sự chuyển tiếp mượt mà giữa các ý. Sử dụng thành thạo các phương tiện liên kết.",
        "Vốn từ phong phú, chính xác và tự nhiên. Sử dụng thành thạo idioms, collocations và academic vocabulary.",
        "Sử dụng đa dạng và linh hoạt các cấu trúc ngữ pháp phức tạp với độ chính xác gần như hoàn hảo.",
    ],
];

const SPEAKING_TEXTS: [[&str; 4]; 3] = [
    [
        "Tốc độ nói còn chậm với nhiều lần dừng. Hãy luyện nói liên tục hơn về các chủ đề quen thuộc.",
        "Vốn từ còn hạn chế. Cần học thêm các cụm diễn đạt hàng ngày và từ vựng theo chủ đề.",
        "Còn nhiều lỗi ngữ pháp cơ bản. Tập trung luyện các thì hiện tại, quá khứ và tương lai đơn.",
        "Phát âm có thể gây khó hiểu cho người nghe. Luyện tập phát âm từng âm và trọng âm từ.",
    ],
    [
        "Bạn có thể duy trì bài nói về chủ đề quen thuộc với một chút do dự. Sử dụng thêm các từ nối.",
        "Vốn từ tốt cho các chủ đề quen thuộc. Mở rộng thêm các cụm diễn đạt và collocations.",
        "Kiểm soát tốt các cấu trúc đơn giản. Luyện thêm câu phức và câu điều kiện.",
        "Phát âm khá rõ ràng. Cần cải thiện ngữ điệu và cách nối âm.",
    ],
    [
        "Bạn nói trôi chảy, chỉ thỉnh thoảng do dự. Sử dụng tuyệt vời các từ nối.",
        "Vốn từ phong phú với việc sử dụng tốt thành ngữ và collocations.",
        "Kiểm soát nhất quán các cấu trúc phức tạp, chỉ thỉnh thoảng có lỗi nhỏ.",
        "Phát âm rõ ràng, tự nhiên với việc kiểm soát tốt trọng âm và ngữ điệu.",
    ],
];
