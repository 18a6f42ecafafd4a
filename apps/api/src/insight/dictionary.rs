//! Closed-vocabulary dictionaries behind the emotion/keyword heuristics.
//!
//! These lists are substring matchers, not linguistics. Some stems appear in
//! more than one emotion list ("즐거", "신나" are in both joy and excitement);
//! the multi-label percentages downstream depend on that, so keep the overlap.

use crate::models::record::Emotion;

pub fn emotion_keywords(emotion: Emotion) -> &'static [&'static str] {
    match emotion {
        Emotion::Joy => &[
            "기쁨", "행복", "좋아", "즐거", "웃", "신나", "즐겁", "기쁘", "행복하", "좋았",
        ],
        Emotion::Sadness => &[
            "슬픔", "우울", "슬프", "아쉽", "후회", "그리워", "외로", "힘들", "피곤",
        ],
        Emotion::Anger => &["화", "짜증", "분노", "화나", "싫", "미워", "열받"],
        Emotion::Fear => &["무서", "두려", "걱정", "불안", "조심", "위험"],
        Emotion::Surprise => &["놀라", "신기", "예상", "깜짝", "놀람", "뜻밖"],
        Emotion::Love => &["사랑", "좋아해", "애정", "고마", "감사", "소중", "따뜻"],
        Emotion::Peace => &["평온", "편안", "안정", "차분", "여유", "조용", "고요"],
        Emotion::Excitement => &["흥분", "설레", "기대", "재미", "즐거", "신나"],
    }
}

/// Curated common nouns — people, places, activities, objects, time words.
/// The curated pass runs before the generic pattern pass, so these terms are
/// the ones most likely to survive the keyword cap.
pub const COMMON_NOUNS: &[&str] = &[
    "친구", "가족", "일", "학교", "직장", "취미", "운동", "음식", "여행",
    "책", "영화", "음악", "게임", "공부", "휴식", "산책", "카페", "식사",
    "만남", "대화", "추억", "기억", "순간", "시간", "하루", "오늘", "어제",
    "아침", "점심", "저녁", "밤", "낮", "날씨", "날", "계절", "봄", "여름", "가을", "겨울",
    "사람", "선생님", "동생", "형", "누나", "언니", "오빠", "엄마", "아빠",
    "집", "방", "거실", "부엌", "화장실", "침대", "책상", "의자",
    "컴퓨터", "핸드폰", "텔레비전", "라디오", "에어컨", "히터",
    "차", "버스", "지하철", "기차", "비행기", "배",
    "공원", "도서관", "영화관", "상점", "마트", "병원", "약국",
    "강아지", "고양이", "새", "물고기",
    "밥", "국", "반찬", "과일", "채소", "고기", "생선",
    "물", "커피", "주스", "우유", "맥주", "소주",
    "옷", "신발", "가방", "모자", "안경",
    "기분", "감정", "마음", "생각", "느낌",
    "일기", "기록", "메모", "편지", "카드",
    "선물", "꽃", "케이크", "초콜릿",
    "시험", "과제", "프로젝트", "발표",
    "회의", "업무", "일정", "계획",
    "독서", "요리", "그림", "사진",
    "휴가", "출장", "여행지", "명소",
    "생일", "기념일", "결혼식", "장례식",
    "축제", "행사", "파티", "모임",
];

/// Particles, demonstratives and other function-word fragments. A pattern-pass
/// candidate containing any of these as a substring is rejected.
pub const STOPWORD_FRAGMENTS: &[&str] = &[
    "에서", "에게", "을", "를", "이", "가", "의", "와", "과", "도", "만",
    "까지", "부터", "처럼", "같이", "보다", "한테", "께", "더", "가장",
    "매우", "정말", "너무", "아주", "참", "진짜", "그냥", "그래", "그런",
    "이런", "저런", "어떤", "무슨", "어느", "어떻게", "왜", "언제", "어디",
    "누구", "무엇", "그것", "이것", "저것",
];
