// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Evaluation prompt.
//!
//! Asks for Thai prose plus one `Category: N/5` line per rubric category so
//! the session can average scores without a second model call.

use coach_core::types::EvaluationRequest;
use coach_core::RubricCategory;

fn criteria(category: RubricCategory, job_title: &str) -> String {
    match category {
        RubricCategory::JobRelevance => format!(
            "ความเกี่ยวข้องกับตำแหน่งงาน: คำตอบสอดคล้องกับความรับผิดชอบของตำแหน่ง {job_title} และแสดงทักษะหรือประสบการณ์ที่เกี่ยวข้องหรือไม่"
        ),
        RubricCategory::TechnicalExpertise => format!(
            "ความรู้และความเชี่ยวชาญ: ความเข้าใจในเทคโนโลยีและทักษะที่จำเป็นสำหรับตำแหน่ง {job_title} ลึกซึ้งเพียงใด"
        ),
        RubricCategory::Communication => {
            "ทักษะการสื่อสาร: อธิบายได้ชัดเจน กระชับ และใช้ภาษาทางเทคนิคอย่างเหมาะสมหรือไม่".to_string()
        }
        RubricCategory::ProblemSolving => {
            "การแก้ปัญหาและการตัดสินใจ: วิธีคิด แนวทางแก้ปัญหา และการตัดสินใจ".to_string()
        }
        RubricCategory::AttitudeLearning => {
            "ทัศนคติและการเรียนรู้: ทัศนคติต่องาน ความกระตือรือร้น และความใฝ่เรียนรู้".to_string()
        }
    }
}

/// Build the evaluation prompt for one answer.
pub fn evaluation_prompt(request: &EvaluationRequest) -> String {
    let job = request.job_title.as_str();
    let question = if request.question.trim().is_empty() {
        "(ไม่มีคำถามก่อนหน้า)"
    } else {
        request.question.as_str()
    };

    let rubric: Vec<String> = RubricCategory::ALL
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}. {c} - {}", i + 1, criteria(*c, job)))
        .collect();
    let score_lines: Vec<String> = RubricCategory::ALL
        .iter()
        .map(|c| format!("{c}: <1-5>/5"))
        .collect();

    format!(
        "คุณเป็นผู้เชี่ยวชาญด้าน HR และการสรรหาบุคลากร กำลังประเมินคำตอบของผู้สมัครสำหรับตำแหน่ง \"{job}\"\n\
         \n\
         คำถาม: {question}\n\
         คำตอบของผู้สมัคร: {answer}\n\
         \n\
         ประเมินคำตอบตามเกณฑ์ต่อไปนี้:\n\
         {rubric}\n\
         \n\
         เริ่มคำตอบด้วยคะแนนทีละบรรทัด ตามรูปแบบนี้ทุกประการ (ชื่อหมวดเป็นภาษาอังกฤษ):\n\
         {scores}\n\
         \n\
         จากนั้นให้: จุดเด่นของคำตอบ, สิ่งที่ควรปรับปรุง, คำแนะนำสำหรับการพัฒนา \
         และคำถามติดตามที่น่าสนใจ ตอบเป็นภาษาไทยและจัดรูปแบบให้อ่านง่าย",
        answer = request.answer,
        rubric = rubric.join("\n"),
        scores = score_lines.join("\n"),
    )
}
